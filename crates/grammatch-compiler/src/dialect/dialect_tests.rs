use super::{Dialect, UnknownDialect};

#[test]
fn parse_names() {
    assert_eq!("w3c".parse(), Ok(Dialect::W3c));
    assert_eq!("EBNF".parse(), Ok(Dialect::W3c));
    assert_eq!("bnf".parse(), Ok(Dialect::Bnf));
    assert_eq!("Custom".parse(), Ok(Dialect::Custom));
    assert_eq!("iso".parse(), Ok(Dialect::Custom));
}

#[test]
fn unknown_name() {
    let err = "abnf".parse::<Dialect>().unwrap_err();
    assert_eq!(err, UnknownDialect("abnf".to_string()));
    insta::assert_snapshot!(err, @"unknown dialect `abnf` (expected w3c, bnf or custom)");
}

#[test]
fn display_names() {
    let names: Vec<String> = Dialect::ALL.iter().map(|d| d.to_string()).collect();
    assert_eq!(names, ["W3C", "BNF", "Custom"]);
}

#[test]
fn extensions() {
    assert_eq!(Dialect::from_extension("ebnf"), Some(Dialect::W3c));
    assert_eq!(Dialect::from_extension("W3C"), Some(Dialect::W3c));
    assert_eq!(Dialect::from_extension("bnf"), Some(Dialect::Bnf));
    assert_eq!(Dialect::from_extension("iso"), Some(Dialect::Custom));
    assert_eq!(Dialect::from_extension("txt"), None);
}

#[test]
fn same_language_in_every_dialect() {
    let w3c = crate::compile(Dialect::W3c, r#"num ::= digit+ digit ::= "0" | "1""#).unwrap();
    let bnf = crate::compile(
        Dialect::Bnf,
        r#"<num> ::= <digit>+ <digit> ::= "0" | "1""#,
    )
    .unwrap();
    let custom = crate::compile(
        Dialect::Custom,
        r#"num = digit , { digit } ; digit = "0" | "1" ;"#,
    )
    .unwrap();

    assert_eq!(w3c, bnf);
    assert_eq!(w3c.summary(), custom.summary());
    assert_eq!(w3c.get("digit"), custom.get("digit"));
}
