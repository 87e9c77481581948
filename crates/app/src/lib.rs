//! # nautilus-app
//!
//! Application layer: the rule engine use-case and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement:
//!   - `RuleRepository`: insert/replace, lookup, enable/disable, delete rules
//!   - `ExecutionLog`: append & query execution results
//!   - `ActionHandler`: perform one action type
//! - Provide **in-process infrastructure** that doesn't need IO:
//!   - in-memory rule store and execution log
//!   - action handler registry with built-in `log`, `delay` and `notify` handlers
//!   - named-event listener registry
//! - Orchestrate rule evaluation and execution in [`rule_engine::RuleEngine`]
//!
//! ## Dependency rule
//! Depends on `nautilus-domain` only (plus `tokio` for timers and channels).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod actions;
pub mod history;
pub mod listeners;
pub mod ports;
pub mod rule_engine;
pub mod rule_store;

mod sync;
