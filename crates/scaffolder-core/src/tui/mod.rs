//! Interactive create flow built on cliclack prompts
//!
//! Asks for the template, project directory, app name and optional packages,
//! then generates the project and installs its dependencies.
//! Only compiled with the `tui` feature.

mod prompts;

pub use prompts::{run, CreateArgs};
