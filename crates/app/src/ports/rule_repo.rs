//! Rule repository port: storage for rules.

use std::future::Future;

use nautilus_domain::error::NautilusError;
use nautilus_domain::id::RuleId;
use nautilus_domain::rule::Rule;

/// Repository for storing and querying [`Rule`]s.
///
/// Rule ids are unique: storing a rule under an existing id replaces the
/// previous one wholesale.
pub trait RuleRepository {
    /// Insert a rule, or replace the one stored under the same id.
    fn upsert(&self, rule: Rule) -> impl Future<Output = Result<(), NautilusError>> + Send;

    /// Get a rule by its identifier.
    fn get_by_id(
        &self,
        id: &RuleId,
    ) -> impl Future<Output = Result<Option<Rule>, NautilusError>> + Send;

    /// Snapshot of all rules, in insertion order.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Rule>, NautilusError>> + Send;

    /// Snapshot of all enabled rules, in insertion order.
    fn get_enabled(&self) -> impl Future<Output = Result<Vec<Rule>, NautilusError>> + Send;

    /// Flip the `enabled` flag in place. Returns `false` when no rule has `id`.
    fn set_enabled(
        &self,
        id: &RuleId,
        enabled: bool,
    ) -> impl Future<Output = Result<bool, NautilusError>> + Send;

    /// Delete a rule. Returns `false` when no rule has `id`.
    fn delete(&self, id: &RuleId) -> impl Future<Output = Result<bool, NautilusError>> + Send;
}
