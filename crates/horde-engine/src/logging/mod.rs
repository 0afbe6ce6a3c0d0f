//! Logging setup and engine message forwarding.
//!
//! The crate logs through the `log` facade. `init_logging` installs
//! `env_logger` for binaries that have no logger of their own.

mod init;
mod messages;

pub use init::{LoggingConfig, init_logging};
pub use messages::{ENGINE_TARGET, forward_engine_messages, level_for};
