use indoc::indoc;

use super::expr::{CharClass, ClassItem, Expr};
use super::rule_set::{Rule, RuleSet};

fn lit(s: &str) -> Expr {
    Expr::literal(s)
}

fn r(s: &str) -> Expr {
    Expr::reference(s)
}

#[test]
fn terminals() {
    assert_eq!(lit("abc").to_string(), r#""abc""#);
    assert_eq!(lit(r#"say "hi""#).to_string(), r#"'say "hi"'"#);
    assert_eq!(Expr::literal_ignore_case("select").to_string(), r#"^"select""#);
    assert_eq!(Expr::EndOfInput.to_string(), "EOF");
}

#[test]
fn literals_quotes_cannot_hold_are_split() {
    assert_eq!(lit("\n").to_string(), "#xA");
    assert_eq!(lit("a\tb").to_string(), r#""a" #x9 "b""#);
    assert_eq!(lit(r#"say "hi", it's"#).to_string(), r#"'say "hi", it' "'s""#);
    assert_eq!(lit("").to_string(), r#""""#);
    assert_eq!(
        Expr::literal_ignore_case("a\nb").to_string(),
        r#"^"a" #xA ^"b""#
    );
}

#[test]
fn split_literals_nest_like_sequences() {
    assert_eq!(Expr::one_or_more(lit("a\n")).to_string(), r#"("a" #xA)+"#);
    assert_eq!(
        Expr::alternation(vec![lit("a\n"), r("b")]).to_string(),
        r#""a" #xA | b"#
    );
}

#[test]
fn char_classes() {
    let class = CharClass::new(vec![
        ClassItem::Range('a', 'z'),
        ClassItem::Char('_'),
        ClassItem::Char('-'),
    ]);
    assert_eq!(Expr::CharClass(class).to_string(), "[a-z_#x2D]");

    let negated = CharClass::negated(vec![ClassItem::Char('"'), ClassItem::Char('\n')]);
    assert_eq!(Expr::CharClass(negated).to_string(), r##"[^"#xA]"##);
}

#[test]
fn postfix_forms() {
    assert_eq!(Expr::optional(r("a")).to_string(), "a?");
    assert_eq!(Expr::zero_or_more(r("a")).to_string(), "a*");
    assert_eq!(Expr::one_or_more(r("a")).to_string(), "a+");
    assert_eq!(Expr::repeat(r("a"), 3, Some(3)).to_string(), "a{3}");
    assert_eq!(Expr::repeat(r("a"), 2, None).to_string(), "a{2,}");
    assert_eq!(Expr::repeat(r("a"), 2, Some(4)).to_string(), "a{2,4}");
}

#[test]
fn parenthesizes_by_precedence() {
    let choice_in_seq = Expr::sequence(vec![
        r("a"),
        Expr::alternation(vec![r("b"), r("c")]),
    ]);
    assert_eq!(choice_in_seq.to_string(), "a (b | c)");

    let seq_in_star = Expr::zero_or_more(Expr::sequence(vec![lit(","), r("item")]));
    assert_eq!(seq_in_star.to_string(), r#"("," item)*"#);

    let seq_in_choice = Expr::alternation(vec![Expr::sequence(vec![r("a"), r("b")]), r("c")]);
    assert_eq!(seq_in_choice.to_string(), "a b | c");

    let diff = Expr::difference(Expr::zero_or_more(r("char")), lit("*/"));
    assert_eq!(diff.to_string(), r#"char* - "*/""#);

    let group = Expr::one_or_more(Expr::group(Expr::alternation(vec![r("a"), r("b")])));
    assert_eq!(group.to_string(), "(a | b)+");
}

#[test]
fn rule_set_listing() {
    let mut rules = RuleSet::new();
    rules
        .insert(Rule::new("num", Expr::one_or_more(r("%digit"))))
        .unwrap();
    rules
        .insert(Rule::new(
            "%digit",
            Expr::CharClass(CharClass::new(vec![ClassItem::Range('0', '9')])),
        ))
        .unwrap();

    assert_eq!(
        rules.to_string(),
        indoc! {"
            num ::= %digit+
            %digit ::= [0-9]"}
    );
}
