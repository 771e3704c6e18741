//! Product configuration trait for CLI binaries
//!
//! The engine is product-agnostic; a binary describes its branding, template
//! locations and post-setup instructions through this trait.

use crate::config::{ConfigModel, ProjectConfig};
use std::path::PathBuf;

/// Configuration trait for a scaffolding CLI product
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for env vars, staging directories)
    fn name(&self) -> &'static str;

    /// Human-readable display name shown in the intro banner
    fn display_name(&self) -> &'static str;

    /// Project name used when none is given in non-interactive mode
    fn default_project_name(&self) -> &'static str;

    /// Environment variable overriding the template store directory or archive
    fn template_dir_env(&self) -> &'static str;

    /// Environment variable pointing at a remote template archive
    fn template_url_env(&self) -> &'static str;

    /// Store shipped alongside the binary, if one can be found
    fn bundled_template_dir(&self) -> Option<PathBuf>;

    /// CLI description shown in help text
    fn cli_description(&self) -> &'static str;

    /// Upgrade/install command shown in version warnings
    fn upgrade_command(&self) -> &'static str;

    /// Generate the "next steps" instructions after project creation.
    ///
    /// Monorepos have no root `dev` script, so the primary app's
    /// `dev:<platform>` script is suggested instead.
    fn next_steps(&self, config: &ProjectConfig, model: &ConfigModel) -> Vec<String> {
        let run = config.package_manager.run_command();
        let dev = if model.is_monorepo(config.preset) {
            let primary = model.descriptor(config.preset).primary_platform();
            format!("{} dev:{}", run, primary)
        } else {
            format!("{} dev", run)
        };
        vec![format!("cd {}", config.name), dev]
    }

    /// Closing remark printed under the next steps
    fn closing_note(&self) -> Option<&'static str> {
        None
    }

    /// User agent string for HTTP requests
    fn user_agent(&self) -> &'static str {
        self.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PackageManager, Preset};

    #[derive(Clone)]
    struct Demo;

    impl ProductConfig for Demo {
        fn name(&self) -> &'static str {
            "demo"
        }
        fn display_name(&self) -> &'static str {
            "Demo"
        }
        fn default_project_name(&self) -> &'static str {
            "demo-app"
        }
        fn template_dir_env(&self) -> &'static str {
            "DEMO_TEMPLATE_DIR"
        }
        fn template_url_env(&self) -> &'static str {
            "DEMO_TEMPLATE_URL"
        }
        fn bundled_template_dir(&self) -> Option<PathBuf> {
            None
        }
        fn cli_description(&self) -> &'static str {
            "demo"
        }
        fn upgrade_command(&self) -> &'static str {
            "cargo install demo"
        }
    }

    #[test]
    fn test_flat_next_steps_run_dev() {
        let model = ConfigModel::standard();
        let config = ProjectConfig::with_defaults(&model, "wallet", Preset::Web);
        assert_eq!(
            Demo.next_steps(&config, &model),
            vec!["cd wallet".to_string(), "npm run dev".to_string()]
        );
    }

    #[test]
    fn test_monorepo_next_steps_target_primary_app() {
        let model = ConfigModel::standard();
        let mut config = ProjectConfig::with_defaults(&model, "mono", Preset::Monorepo);
        config.package_manager = PackageManager::Pnpm;
        assert_eq!(Demo.next_steps(&config, &model)[1], "pnpm dev:mobile");

        let config = ProjectConfig::with_defaults(&model, "site", Preset::FullstackWeb);
        assert_eq!(Demo.next_steps(&config, &model)[1], "npm run dev:web");
    }
}
