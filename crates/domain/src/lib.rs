//! # nautilus-domain
//!
//! Pure domain model for the nautilus rule engine.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers and error conventions
//! - Define **Rules** (trigger → actions bindings with priority and enable flag)
//! - Define **Triggers** (event-type match or field condition) and their evaluation
//! - Define **Actions** (type tag plus open configuration)
//! - Define **Events** (open records presented to the dispatcher)
//! - Define **Execution results** (outcome of one attempt to run a rule)
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app` or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;

pub mod event;
pub mod execution;
pub mod rule;
