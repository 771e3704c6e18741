//! External tools the scaffolder talks to
//!
//! - Availability checks for package managers and git
//! - Dependency installation and repository initialization

pub mod check;
pub mod process;

pub use check::{check_git, check_package_manager, check_tool, ToolInfo};
pub use process::{init_git, install_command, install_dependencies};
