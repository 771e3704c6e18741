//! Interactive front end built on cliclack
//!
//! Only available when the `tui` feature is enabled.

mod prompts;

pub use prompts::{run, CreateArgs, Outcome};
