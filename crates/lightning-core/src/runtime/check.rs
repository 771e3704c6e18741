//! Tool availability detection for package managers and git

use crate::config::PackageManager;
use std::process::Command;

/// Tool detection result
#[derive(Debug, Clone)]
pub struct ToolInfo {
    pub name: &'static str,
    pub version: Option<String>,
    pub available: bool,
}

impl ToolInfo {
    /// Short status for prompt hints, e.g. `v10.2.0` or `not installed`
    pub fn status(&self) -> String {
        match (&self.version, self.available) {
            (Some(version), true) => version.clone(),
            (None, true) => "installed".to_string(),
            (_, false) => "not installed".to_string(),
        }
    }
}

/// Run `<binary> --version` and report what was found
pub fn check_tool(name: &'static str, binary: &str) -> ToolInfo {
    let output = Command::new(binary).arg("--version").output();

    match output {
        Ok(out) if out.status.success() => {
            let version = String::from_utf8_lossy(&out.stdout)
                .lines()
                .next()
                .map(|line| line.trim().to_string())
                .filter(|line| !line.is_empty());
            ToolInfo {
                name,
                version,
                available: true,
            }
        }
        _ => ToolInfo {
            name,
            version: None,
            available: false,
        },
    }
}

pub fn check_package_manager(pm: PackageManager) -> ToolInfo {
    check_tool(pm.as_str(), pm.as_str())
}

pub fn check_git() -> ToolInfo {
    check_tool("git", "git")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_tool_is_unavailable() {
        let info = check_tool("nope", "definitely-not-a-real-binary-1234");
        assert!(!info.available);
        assert_eq!(info.status(), "not installed");
    }

    #[test]
    fn test_status_prefers_version() {
        let info = ToolInfo {
            name: "npm",
            version: Some("10.2.0".to_string()),
            available: true,
        };
        assert_eq!(info.status(), "10.2.0");
    }
}
