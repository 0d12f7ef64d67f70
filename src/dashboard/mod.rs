//! Dashboard command handling.
//!
//! This module provides the command table, the dispatcher state machine
//! and the async session driver that feeds it.

pub mod commands;
pub mod dispatcher;
pub mod session;

pub use commands::CommandTable;
pub use dispatcher::{DispatchResult, Dispatcher, SessionState};
pub use session::{run_session, SessionOptions};
