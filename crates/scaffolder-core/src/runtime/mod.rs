//! Runtime detection and package manager invocation
//!
//! This module provides:
//! - Node.js and package manager detection
//! - Running the package manager's install step in a generated project

pub mod check;
pub mod tool;

pub use check::{check_node, check_package_manager, check_runtimes, RuntimeInfo};
pub use tool::ToolManager;
