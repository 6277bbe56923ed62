//! CLI command handlers, one file per command.

mod drain;
mod remove;
mod send;
mod status;

pub use drain::run_drain;
pub use remove::run_remove;
pub use send::{run_send, SendArgs};
pub use status::{run_status, status_lines};
