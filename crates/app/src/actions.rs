//! Action execution: the handler registry and built-in handlers.

pub mod delay;
pub mod log;
pub mod notify;
pub mod registry;

pub use delay::DelayHandler;
pub use log::LogHandler;
pub use notify::{Notification, NotifyHandler};
pub use registry::{ActionHandlerRegistry, UnknownActionPolicy};
