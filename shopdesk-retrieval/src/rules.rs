//! Ordered predicate → handler tables with first-match-wins semantics.
//!
//! The dispatcher, the order strategy, the inventory strategy, and the
//! semantic hit chain are each one table. Rules are named so callers can log
//! and test which one fired.

/// A named rule: `when` decides, `then` produces.
pub struct Rule<C, O> {
    pub name: &'static str,
    pub when: fn(&C) -> bool,
    pub then: fn(&C) -> O,
}

/// The output of the rule that fired, tagged with its name.
#[derive(Debug, Clone, PartialEq)]
pub struct Fired<O> {
    pub rule: &'static str,
    pub value: O,
}

pub struct RuleTable<C, O> {
    name: &'static str,
    rules: Vec<Rule<C, O>>,
}

impl<C, O> RuleTable<C, O> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            rules: Vec::new(),
        }
    }

    /// Append a rule. Earlier rules take precedence.
    pub fn rule(mut self, name: &'static str, when: fn(&C) -> bool, then: fn(&C) -> O) -> Self {
        self.rules.push(Rule { name, when, then });
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name).collect()
    }

    /// Name of the first rule whose predicate holds, without running it.
    pub fn matching_rule(&self, ctx: &C) -> Option<&'static str> {
        self.rules.iter().find(|r| (r.when)(ctx)).map(|r| r.name)
    }

    /// Run the first matching rule. `None` when no predicate holds.
    pub fn apply(&self, ctx: &C) -> Option<Fired<O>> {
        self.rules.iter().find(|r| (r.when)(ctx)).map(|r| Fired {
            rule: r.name,
            value: (r.then)(ctx),
        })
    }
}
