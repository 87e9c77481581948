//! Port definitions: traits that adapters implement.
//!
//! Ports are the boundaries between the rule engine and the outside world.
//! They are defined here (in `app`) so that both the use-case layer and the
//! adapter layer can depend on them without creating circular dependencies.

pub mod action_handler;
pub mod execution_log;
pub mod rule_repo;

pub use action_handler::{ActionHandler, ExecutionContext};
pub use execution_log::ExecutionLog;
pub use rule_repo::RuleRepository;
