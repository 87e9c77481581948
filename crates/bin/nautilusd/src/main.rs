//! # nautilusd: nautilus rule engine daemon
//!
//! Composition root that wires the rule engine together and feeds it events.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Install the `tracing` subscriber (logs go to stderr)
//! - Load rules from the rules file into the in-memory store
//! - Register action handlers (`log`, `delay`, `notify`)
//! - Read newline-delimited JSON events from stdin, dispatch each through
//!   the engine and write every execution result as a JSON line to stdout
//! - Stop on end of input or Ctrl-C
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer. No rule logic belongs here.

mod config;
mod rules_file;

use anyhow::Context;
use nautilus_app::actions::{ActionHandlerRegistry, NotifyHandler};
use nautilus_app::history::InMemoryExecutionLog;
use nautilus_app::rule_engine::RuleEngine;
use nautilus_app::rule_store::InMemoryRuleStore;
use nautilus_domain::event::Event;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("loading configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .with_writer(std::io::stderr)
        .init();

    let rules = rules_file::load(config.rules_path())
        .with_context(|| format!("loading rules from {}", config.rules_path().display()))?;
    tracing::info!(count = rules.len(), "rules loaded");

    // Actions
    let notifier = NotifyHandler::new(256);
    let actions = ActionHandlerRegistry::with_builtins()
        .with_handler(NotifyHandler::ACTION_TYPE, notifier.clone())
        .unknown_action_policy(config.engine.unknown_actions)
        .simulated_latency(config.action_delay());

    // Engine
    let engine = RuleEngine::new(
        InMemoryRuleStore::with(rules),
        InMemoryExecutionLog::bounded(config.engine.history_capacity),
        actions,
    )
    .with_config(config.engine_config());
    engine.on("shutdown", || tracing::info!("engine shutting down"));

    let mut notifications = notifier.subscribe();
    tokio::spawn(async move {
        loop {
            match notifications.recv().await {
                Ok(n) => tracing::info!(channel = %n.channel, event_type = ?n.event_type, "{}", n.message),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "notification subscriber lagged");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = tokio::select! {
            line = lines.next_line() => line.context("reading stdin")?,
            _ = tokio::signal::ctrl_c() => None,
        };
        let Some(line) = line else { break };
        if line.trim().is_empty() {
            continue;
        }

        let event: Event = match serde_json::from_str(&line) {
            Ok(event) => event,
            Err(err) => {
                tracing::warn!(error = %err, "skipping malformed event");
                continue;
            }
        };

        for result in engine.process_event(&event).await? {
            println!("{}", serde_json::to_string(&result)?);
        }
    }

    let history = engine.get_execution_history().await?;
    let failed = history.iter().filter(|r| !r.success).count();
    tracing::info!(executions = history.len(), failed, "input exhausted");
    engine.emit("shutdown");

    Ok(())
}
