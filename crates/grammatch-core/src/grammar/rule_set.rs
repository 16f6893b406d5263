//! Ordered, name-indexed table of rules.

use indexmap::IndexMap;
use indexmap::map::Entry;
use serde::Serialize;

use super::expr::Expr;

/// Prefix marking a rule as a fragment in every dialect.
pub const FRAGMENT_PREFIX: char = '%';

/// Reserved reference name for the end of input, unless a rule by that name exists.
pub const END_OF_INPUT: &str = "EOF";

/// Position of a rule in its [`RuleSet`]. Stable for the lifetime of the set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RuleId(u32);

impl RuleId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rule {
    pub name: String,
    pub expr: Expr,
    /// Fragments are matched like any rule but never wrap their result in a token.
    pub fragment: bool,
}

impl Rule {
    /// Builds a rule, deriving `fragment` from the `%` name prefix.
    pub fn new(name: impl Into<String>, expr: Expr) -> Self {
        let name = name.into();
        let fragment = name.starts_with(FRAGMENT_PREFIX);
        Self {
            name,
            expr,
            fragment,
        }
    }
}

/// Compiled grammar: rules in source order, unique by name.
///
/// References inside expressions hold names, so the table may describe
/// arbitrarily recursive grammars without any back-pointers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RuleSet {
    rules: IndexMap<String, Rule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule. A rule with the same name is left untouched and the new one is handed back.
    pub fn insert(&mut self, rule: Rule) -> Result<RuleId, Rule> {
        let index = self.rules.len();
        match self.rules.entry(rule.name.clone()) {
            Entry::Occupied(_) => Err(rule),
            Entry::Vacant(slot) => {
                slot.insert(rule);
                Ok(RuleId(index as u32))
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules.get(name)
    }

    /// Looks a rule up by name, returning its id alongside.
    pub fn lookup(&self, name: &str) -> Option<(RuleId, &Rule)> {
        self.rules
            .get_full(name)
            .map(|(index, _, rule)| (RuleId(index as u32), rule))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Rule> {
        self.rules.values_mut()
    }

    /// Names of the non-fragment rules, in source order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.iter().filter(|r| !r.fragment).map(|r| r.name.as_str())
    }

    /// First non-fragment rule, or the first rule when every rule is a fragment.
    pub fn default_start(&self) -> Option<(RuleId, &Rule)> {
        let index = self
            .rules
            .values()
            .position(|r| !r.fragment)
            .or(if self.rules.is_empty() { None } else { Some(0) })?;
        Some((RuleId(index as u32), &self.rules[index]))
    }

    /// `"N rules: a, b"` with N counting every rule and the list omitting fragments.
    pub fn summary(&self) -> String {
        let names: Vec<&str> = self.names().collect();
        let noun = if self.len() == 1 { "rule" } else { "rules" };
        if names.is_empty() {
            format!("{} {}", self.len(), noun)
        } else {
            format!("{} {}: {}", self.len(), noun, names.join(", "))
        }
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = indexmap::map::Values<'a, String, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.values()
    }
}
