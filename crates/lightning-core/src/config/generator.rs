//! Generated configuration files that have no template counterpart

use super::options::{PackageManager, Platform};
use serde::Serialize;
use serde_json::{json, Map, Value};

/// Workspace globs shared by every package manager
pub const WORKSPACE_GLOBS: [&str; 2] = ["apps/*", "packages/*"];

/// File name of the dedicated workspace declaration used by pnpm
pub const PNPM_WORKSPACE_FILE: &str = "pnpm-workspace.yaml";

#[derive(Serialize)]
struct PnpmWorkspace<'a> {
    packages: &'a [&'a str],
}

/// Script each app package exposes for its development server
pub fn app_dev_script(platform: Platform) -> &'static str {
    match platform {
        Platform::Mobile => "start",
        Platform::Web => "dev",
    }
}

/// Script the backend package exposes for its watch-mode server
pub const BACKEND_DEV_SCRIPT: &str = "start:dev";

/// Root `package.json` of a monorepo.
///
/// One `dev:<app>` script per generated app (and `dev:backend` when the
/// backend package is a server), each delegating to the package's own script. The
/// `workspaces` field is omitted for package managers that read a dedicated
/// workspace file instead.
pub fn monorepo_root_manifest(
    name: &str,
    package_manager: PackageManager,
    platforms: &[Platform],
    with_backend: bool,
) -> Value {
    let mut scripts = Map::new();
    for &platform in platforms {
        scripts.insert(
            format!("dev:{}", platform),
            json!(format!(
                "cd apps/{} && npm run {}",
                platform,
                app_dev_script(platform)
            )),
        );
    }
    if with_backend {
        scripts.insert(
            "dev:backend".to_string(),
            json!(format!("cd packages/backend && npm run {}", BACKEND_DEV_SCRIPT)),
        );
    }

    let mut manifest = json!({
        "name": name,
        "private": true,
        "scripts": scripts,
    });

    if !package_manager.uses_workspace_file() {
        manifest["workspaces"] = json!(WORKSPACE_GLOBS);
    }

    manifest
}

/// Contents of `pnpm-workspace.yaml`
pub fn pnpm_workspace() -> Result<String, serde_yaml::Error> {
    serde_yaml::to_string(&PnpmWorkspace {
        packages: &WORKSPACE_GLOBS,
    })
}

/// EAS Build profiles for app store deployment
pub fn eas_config() -> Value {
    json!({
        "cli": { "version": ">= 7.0.0" },
        "build": {
            "development": { "developmentClient": true, "distribution": "internal" },
            "preview": { "distribution": "internal" },
            "production": {}
        },
        "submit": { "production": {} }
    })
}

/// Pretty JSON with two-space indentation and a trailing newline
pub fn to_json_file(value: &Value) -> Result<String, serde_json::Error> {
    let mut out = serde_json::to_string_pretty(value)?;
    out.push('\n');
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_manifest_declares_workspaces_inline() {
        let manifest = monorepo_root_manifest(
            "acme",
            PackageManager::Npm,
            &[Platform::Mobile, Platform::Web],
            true,
        );
        assert_eq!(manifest["name"], "acme");
        assert_eq!(manifest["private"], true);
        assert_eq!(manifest["workspaces"], json!(["apps/*", "packages/*"]));
        assert_eq!(
            manifest["scripts"]["dev:web"],
            "cd apps/web && npm run dev"
        );
        assert_eq!(
            manifest["scripts"]["dev:mobile"],
            "cd apps/mobile && npm run start"
        );
        assert_eq!(
            manifest["scripts"]["dev:backend"],
            "cd packages/backend && npm run start:dev"
        );
    }

    #[test]
    fn test_root_scripts_only_for_generated_packages() {
        let manifest =
            monorepo_root_manifest("acme", PackageManager::Npm, &[Platform::Mobile], false);
        let scripts = manifest["scripts"].as_object().unwrap();
        assert_eq!(scripts.keys().collect::<Vec<_>>(), vec!["dev:mobile"]);
    }

    #[test]
    fn test_pnpm_root_manifest_omits_workspaces() {
        let manifest = monorepo_root_manifest("acme", PackageManager::Pnpm, &[Platform::Web], true);
        assert!(manifest.get("workspaces").is_none());
    }

    #[test]
    fn test_pnpm_workspace_lists_globs() {
        let yaml = pnpm_workspace().unwrap();
        let parsed: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();
        let packages: Vec<&str> = parsed["packages"]
            .as_sequence()
            .unwrap()
            .iter()
            .filter_map(|v| v.as_str())
            .collect();
        assert_eq!(packages, vec!["apps/*", "packages/*"]);
    }

    #[test]
    fn test_eas_config_profiles() {
        let eas = eas_config();
        assert_eq!(eas["build"]["development"]["developmentClient"], true);
        assert!(eas["submit"]["production"].is_object());
    }

    #[test]
    fn test_json_file_is_two_space_indented() {
        let out = to_json_file(&json!({ "a": 1 })).unwrap();
        assert_eq!(out, "{\n  \"a\": 1\n}\n");
    }
}
