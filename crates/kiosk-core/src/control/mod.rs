//! Remote control over TCP.
//!
//! One command per connection, plain UTF-8 text, no response:
//! `exit` stops the controller, any other non-empty text becomes the new
//! target.

pub mod client;
pub mod command;
pub mod errors;
pub mod listener;

pub use client::send_command;
pub use command::ControlCommand;
pub use errors::ControlError;
pub use listener::{CommandListener, MAX_COMMAND_BYTES};
