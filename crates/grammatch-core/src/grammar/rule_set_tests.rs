use super::expr::Expr;
use super::rule_set::{Rule, RuleSet};

fn rule(name: &str) -> Rule {
    Rule::new(name, Expr::literal("x"))
}

fn set(names: &[&str]) -> RuleSet {
    let mut rules = RuleSet::new();
    for name in names {
        rules.insert(rule(name)).unwrap();
    }
    rules
}

#[test]
fn fragment_flag_from_prefix() {
    assert!(rule("%digit").fragment);
    assert!(!rule("digit").fragment);
}

#[test]
fn duplicate_is_rejected() {
    let mut rules = set(&["a"]);
    let rejected = rules.insert(Rule::new("a", Expr::literal("y"))).unwrap_err();

    assert_eq!(rejected.expr, Expr::literal("y"));
    assert_eq!(rules.len(), 1);
    assert_eq!(rules.get("a").unwrap().expr, Expr::literal("x"));
}

#[test]
fn ids_follow_insertion_order() {
    let rules = set(&["b", "a", "c"]);
    let (id, found) = rules.lookup("a").unwrap();

    assert_eq!(id.index(), 1);
    assert_eq!(found.name, "a");
    assert!(rules.lookup("z").is_none());
}

#[test]
fn names_skip_fragments() {
    let rules = set(&["%ws", "expr", "%digit", "term"]);
    assert_eq!(rules.names().collect::<Vec<_>>(), ["expr", "term"]);
}

#[test]
fn default_start_is_first_non_fragment() {
    let rules = set(&["%ws", "expr", "term"]);
    assert_eq!(rules.default_start().unwrap().1.name, "expr");
}

#[test]
fn default_start_falls_back_to_first_fragment() {
    let rules = set(&["%a", "%b"]);
    assert_eq!(rules.default_start().unwrap().1.name, "%a");
    assert!(RuleSet::new().default_start().is_none());
}

#[test]
fn summary() {
    assert_eq!(set(&["a", "%b", "c"]).summary(), "3 rules: a, c");
    assert_eq!(set(&["digit"]).summary(), "1 rule: digit");
    assert_eq!(set(&["%only"]).summary(), "1 rule");
    assert_eq!(RuleSet::new().summary(), "0 rules");
}

#[test]
fn serializes_as_name_map() {
    let json = serde_json::to_string(&set(&["a"])).unwrap();
    insta::assert_snapshot!(json, @r#"{"a":{"name":"a","expr":{"kind":"literal","text":"x","case_sensitive":true},"fragment":false}}"#);
}
