//! In-memory rule store.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Mutex;

use nautilus_domain::error::NautilusError;
use nautilus_domain::id::RuleId;
use nautilus_domain::rule::Rule;

use crate::ports::RuleRepository;
use crate::sync::lock;

/// [`RuleRepository`] keeping rules in insertion order.
///
/// Replacing a rule keeps its original position, so ties in priority are
/// always broken by first insertion.
#[derive(Debug, Default)]
pub struct InMemoryRuleStore {
    rules: Mutex<OrderedRules>,
}

/// Rules in insertion order, indexed by id.
#[derive(Debug, Default)]
struct OrderedRules {
    ordered: Vec<Rule>,
    index: HashMap<RuleId, usize>,
}

impl OrderedRules {
    fn upsert(&mut self, rule: Rule) {
        match self.index.get(&rule.id) {
            Some(&position) => self.ordered[position] = rule,
            None => {
                self.index.insert(rule.id.clone(), self.ordered.len());
                self.ordered.push(rule);
            }
        }
    }

    fn get(&self, id: &RuleId) -> Option<&Rule> {
        self.index.get(id).map(|&position| &self.ordered[position])
    }

    fn get_mut(&mut self, id: &RuleId) -> Option<&mut Rule> {
        let position = *self.index.get(id)?;
        self.ordered.get_mut(position)
    }

    fn remove(&mut self, id: &RuleId) -> bool {
        let Some(position) = self.index.remove(id) else {
            return false;
        };
        self.ordered.remove(position);
        for rule in &self.ordered[position..] {
            if let Some(slot) = self.index.get_mut(&rule.id) {
                *slot -= 1;
            }
        }
        true
    }
}

impl InMemoryRuleStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-filled with `rules`, later duplicates replacing
    /// earlier ones.
    #[must_use]
    pub fn with(rules: impl IntoIterator<Item = Rule>) -> Self {
        let mut stored = OrderedRules::default();
        for rule in rules {
            stored.upsert(rule);
        }
        Self {
            rules: Mutex::new(stored),
        }
    }

    /// Number of stored rules.
    #[must_use]
    pub fn len(&self) -> usize {
        lock(&self.rules).ordered.len()
    }

    /// Whether the store holds no rule.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        lock(&self.rules).ordered.is_empty()
    }
}

impl RuleRepository for InMemoryRuleStore {
    fn upsert(&self, rule: Rule) -> impl Future<Output = Result<(), NautilusError>> + Send {
        lock(&self.rules).upsert(rule);
        async { Ok(()) }
    }

    fn get_by_id(
        &self,
        id: &RuleId,
    ) -> impl Future<Output = Result<Option<Rule>, NautilusError>> + Send {
        let found = lock(&self.rules).get(id).cloned();
        async { Ok(found) }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Rule>, NautilusError>> + Send {
        let all = lock(&self.rules).ordered.clone();
        async { Ok(all) }
    }

    fn get_enabled(&self) -> impl Future<Output = Result<Vec<Rule>, NautilusError>> + Send {
        let enabled: Vec<Rule> = lock(&self.rules)
            .ordered
            .iter()
            .filter(|r| r.enabled)
            .cloned()
            .collect();
        async { Ok(enabled) }
    }

    fn set_enabled(
        &self,
        id: &RuleId,
        enabled: bool,
    ) -> impl Future<Output = Result<bool, NautilusError>> + Send {
        let found = match lock(&self.rules).get_mut(id) {
            Some(rule) => {
                rule.enabled = enabled;
                true
            }
            None => false,
        };
        async move { Ok(found) }
    }

    fn delete(&self, id: &RuleId) -> impl Future<Output = Result<bool, NautilusError>> + Send {
        let removed = lock(&self.rules).remove(id);
        async move { Ok(removed) }
    }
}
