//! The project configuration consumed by the composer

use super::model::ConfigModel;
use super::options::{
    Animation, Backend, Components, PackageManager, Preset, StateManager, Styling, WebFramework,
};
use crate::error::ConfigError;
use serde::Serialize;
use std::fmt::Display;
use std::path::Path;

/// Everything the composer needs to know about the project to generate.
///
/// Built once, either from prompts or from [`ProjectConfig::with_defaults`],
/// validated at the boundary and then only read. Serialized with camelCase
/// keys as the render context of `.hbs` templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    pub name: String,
    pub preset: Preset,
    pub web_framework: WebFramework,
    pub backend: Backend,
    pub styling: Styling,
    pub state: StateManager,
    pub components: Components,
    pub animation: Animation,
    pub package_manager: PackageManager,
    pub git_init: bool,
    pub eas: bool,
}

impl ProjectConfig {
    /// Configuration used by `--yes` / `--preset`: the first compatible value
    /// of every option family.
    pub fn with_defaults(model: &ConfigModel, name: impl Into<String>, preset: Preset) -> Self {
        let options = model.compatible_options(preset, Some(WebFramework::Nextjs));
        Self {
            name: name.into(),
            preset,
            web_framework: WebFramework::Nextjs,
            backend: options.default_backend(),
            styling: options.default_styling(),
            state: options.default_state(),
            components: options.default_components(),
            animation: options.default_animation(),
            package_manager: PackageManager::Npm,
            git_init: true,
            eas: model.has_mobile(preset),
        }
    }

    /// Check every option against the compatibility matrix of the preset
    pub fn validate(&self, model: &ConfigModel) -> Result<(), ConfigError> {
        validate_name_format(&self.name)?;

        let options = model.compatible_options(self.preset, Some(self.web_framework));
        self.check("web framework", self.web_framework, &options.web_framework)?;
        self.check("styling", self.styling, &options.styling)?;
        self.check("components", self.components, &options.components)?;
        self.check("backend", self.backend, &options.backend)?;
        self.check("state manager", self.state, &options.state)?;
        self.check("animation", self.animation, &options.animation)?;

        if self.eas && !model.has_mobile(self.preset) {
            return Err(ConfigError::Incompatible {
                field: "eas",
                value: "true".to_string(),
                preset: self.preset.to_string(),
                allowed: "false".to_string(),
            });
        }

        Ok(())
    }

    fn check<T: PartialEq + Display>(
        &self,
        field: &'static str,
        value: T,
        allowed: &[T],
    ) -> Result<(), ConfigError> {
        if allowed.contains(&value) {
            return Ok(());
        }
        Err(ConfigError::Incompatible {
            field,
            value: value.to_string(),
            preset: self.preset.to_string(),
            allowed: allowed
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", "),
        })
    }
}

fn validate_name_format(name: &str) -> Result<(), ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if name.is_empty() {
        return Err(invalid("Project name is required"));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(invalid(
            "Only letters, numbers, hyphens, and underscores allowed",
        ));
    }
    Ok(())
}

/// Validate a project name typed at the prompt.
///
/// Beyond the character rules this also rejects names whose directory
/// already exists under `cwd`.
pub fn validate_project_name(name: &str, cwd: &Path) -> Result<(), String> {
    validate_name_format(name).map_err(|e| match e {
        ConfigError::InvalidName { reason, .. } => reason,
        other => other.to_string(),
    })?;

    if cwd.join(name).exists() {
        return Err(format!("Directory \"{}\" already exists", name));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid_for_every_preset() {
        let model = ConfigModel::standard();
        for preset in Preset::ALL {
            let config = ProjectConfig::with_defaults(&model, "my-lightning-app", preset);
            assert_eq!(config.validate(&model), Ok(()), "{preset}");
        }
    }

    #[test]
    fn test_mobile_defaults() {
        let model = ConfigModel::standard();
        let config = ProjectConfig::with_defaults(&model, "app", Preset::Mobile);
        assert_eq!(config.styling, Styling::Nativewind);
        assert_eq!(config.components, Components::NativewindUi);
        assert_eq!(config.animation, Animation::Reanimated);
        assert_eq!(config.backend, Backend::None);
        assert!(config.eas);
        assert!(config.git_init);
    }

    #[test]
    fn test_fullstack_defaults_pick_first_backend() {
        let model = ConfigModel::standard();
        let config = ProjectConfig::with_defaults(&model, "app", Preset::FullstackWeb);
        assert_eq!(config.backend, Backend::NestjsPostgres);
        assert_eq!(config.styling, Styling::Tailwind);
        assert!(!config.eas);
    }

    #[test]
    fn test_rejects_tailwind_on_mobile() {
        let model = ConfigModel::standard();
        let mut config = ProjectConfig::with_defaults(&model, "app", Preset::Mobile);
        config.styling = Styling::Tailwind;

        match config.validate(&model) {
            Err(ConfigError::Incompatible { field, allowed, .. }) => {
                assert_eq!(field, "styling");
                assert_eq!(allowed, "nativewind, none");
            }
            other => panic!("expected incompatible styling, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_backend_without_fullstack() {
        let model = ConfigModel::standard();
        let mut config = ProjectConfig::with_defaults(&model, "app", Preset::Web);
        config.backend = Backend::Supabase;
        assert!(config.validate(&model).is_err());
    }

    #[test]
    fn test_rejects_eas_without_mobile() {
        let model = ConfigModel::standard();
        let mut config = ProjectConfig::with_defaults(&model, "app", Preset::Web);
        config.eas = true;
        assert!(matches!(
            config.validate(&model),
            Err(ConfigError::Incompatible { field: "eas", .. })
        ));
    }

    #[test]
    fn test_name_rules() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("taken")).unwrap();

        assert!(validate_project_name("my-app_2", dir.path()).is_ok());
        assert_eq!(
            validate_project_name("", dir.path()).unwrap_err(),
            "Project name is required"
        );
        assert!(validate_project_name("my app", dir.path()).is_err());
        assert!(validate_project_name("../escape", dir.path()).is_err());
        assert_eq!(
            validate_project_name("taken", dir.path()).unwrap_err(),
            "Directory \"taken\" already exists"
        );
    }

    #[test]
    fn test_render_context_uses_camel_case_keys() {
        let model = ConfigModel::standard();
        let config = ProjectConfig::with_defaults(&model, "app", Preset::Web);
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["webFramework"], "nextjs");
        assert_eq!(value["packageManager"], "npm");
        assert_eq!(value["gitInit"], true);
        assert_eq!(value["components"], "shadcn");
    }
}
