//! Charm-style CLI prompts using cliclack

use crate::config::options::plain_label;
use crate::config::{
    Animation, Backend, ConfigModel, PackageManager, Preset, ProjectConfig, StateManager,
};
use crate::product::ProductConfig;
use crate::runtime::{check, process};
use crate::scaffold::Scaffolder;
use crate::templates::{check_compatibility, TemplateFetcher, TemplateSource, TemplateStore};
use anyhow::{Context, Result};
use console::style;
use std::io;
use std::path::{Path, PathBuf};

/// CLI arguments for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Template store directory or archive to use instead of the resolved default
    pub template_dir: Option<PathBuf>,

    /// Project name
    pub name: Option<String>,

    /// Preset; giving one skips the prompts
    pub preset: Option<Preset>,

    /// Accept defaults for every prompt
    pub yes: bool,

    /// Do not run the package manager after scaffolding
    pub skip_install: bool,
}

impl CreateArgs {
    fn non_interactive(&self) -> bool {
        self.yes || self.preset.is_some()
    }
}

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Project written to this directory
    Created(PathBuf),
    /// The user backed out of a prompt
    Cancelled,
}

/// Unwrap a prompt answer, returning `Ok(None)` from the enclosing function
/// when the user cancels (Esc / Ctrl+C inside cliclack).
macro_rules! answer {
    ($prompt:expr) => {
        match $prompt.interact() {
            Ok(value) => value,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => return Ok(None),
            Err(e) => return Err(e.into()),
        }
    };
}

/// Run the CLI: collect a configuration, scaffold, install and init git
pub async fn run<C: ProductConfig>(
    product: &C,
    args: CreateArgs,
    cli_version: &str,
) -> Result<Outcome> {
    let model = ConfigModel::standard();
    let cwd = std::env::current_dir().context("Failed to read the current directory")?;
    let banner = style(format!(" {} ", product.display_name()))
        .on_cyan()
        .black();

    let config = if args.non_interactive() {
        let name = args
            .name
            .clone()
            .unwrap_or_else(|| product.default_project_name().to_string());
        let preset = args.preset.unwrap_or(Preset::Mobile);
        let config = ProjectConfig::with_defaults(&model, name, preset);
        config.validate(&model)?;

        cliclack::intro(banner)?;
        cliclack::log::info(format!("Creating: {} ({})", config.name, config.preset))?;
        config
    } else {
        cliclack::intro(banner)?;
        match prompt_config(&model, &cwd, args.name.as_deref())? {
            Some(config) => {
                config.validate(&model)?;
                config
            }
            None => {
                cliclack::outro_cancel("Operation cancelled")?;
                return Ok(Outcome::Cancelled);
            }
        }
    };

    let store = load_store(product, args.template_dir.clone(), cli_version).await?;
    let scaffolder = Scaffolder::new(store, model).with_cwd(cwd);

    let root = create_project(&scaffolder, &config, args.skip_install).await?;

    cliclack::outro(style("✓ Project created successfully!").green())?;
    print_next_steps(product, &config, scaffolder.model());

    Ok(Outcome::Created(root))
}

/// Interactive prompt sequence. `None` means the user cancelled.
fn prompt_config(
    model: &ConfigModel,
    cwd: &Path,
    initial_name: Option<&str>,
) -> Result<Option<ProjectConfig>> {
    let owned_cwd = cwd.to_path_buf();
    let mut name_prompt = cliclack::input("Project name:")
        .placeholder("my-app")
        .validate(move |input: &String| crate::config::validate_project_name(input, &owned_cwd));
    if let Some(name) = initial_name {
        name_prompt = name_prompt.default_input(name);
    }
    let name: String = answer!(name_prompt);

    let mut preset_prompt = cliclack::select("Select a preset:");
    for (preset, descriptor) in model.presets() {
        preset_prompt = preset_prompt.item(preset, descriptor.label, descriptor.hint);
    }
    let preset: Preset = answer!(preset_prompt);

    let mut config = ProjectConfig::with_defaults(model, name, preset);

    if model.has_web(preset) {
        let mut prompt = cliclack::select("Web framework:");
        for framework in model.web_frameworks(preset) {
            prompt = prompt.item(framework, framework.label(), framework.hint());
        }
        config.web_framework = answer!(prompt);
    }

    let options = model.compatible_options(preset, Some(config.web_framework));

    if model.has_backend(preset) {
        let mut prompt = cliclack::select("Backend:");
        for &backend in options.backend.iter().filter(|b| **b != Backend::None) {
            prompt = prompt.item(backend, backend.label(), backend.hint());
        }
        config.backend = answer!(prompt);
    }

    // Without customizing, no animation library is installed
    config.state = StateManager::Zustand;
    config.animation = Animation::None;

    let customize: bool = answer!(
        cliclack::confirm("Customize styling, state & animations?").initial_value(false)
    );
    if customize {
        let mut prompt = cliclack::select("Styling:");
        for &styling in &options.styling {
            prompt = prompt.item(styling, plain_label(styling.as_str()), "");
        }
        config.styling = answer!(prompt);

        let mut prompt = cliclack::select("State management:");
        for &state in &options.state {
            prompt = prompt.item(state, state.label(), state.hint());
        }
        config.state = answer!(prompt);

        let mut prompt = cliclack::select("Component library:");
        for &components in &options.components {
            prompt = prompt.item(components, plain_label(components.as_str()), "");
        }
        config.components = answer!(prompt);

        let mut prompt = cliclack::select("Animations:");
        for &animation in &options.animation {
            prompt = prompt.item(animation, animation.label(), animation.hint());
        }
        config.animation = answer!(prompt);
    }

    config.eas = false;
    if model.has_mobile(preset) {
        config.eas = answer!(
            cliclack::confirm("Setup EAS Build for app store deployment?").initial_value(true)
        );
    }

    let mut prompt = cliclack::select("Package manager:");
    for pm in PackageManager::ALL {
        prompt = prompt.item(pm, pm.as_str(), check::check_package_manager(pm).status());
    }
    config.package_manager = answer!(prompt);

    let git_available = check::check_git().available;
    config.git_init = answer!(
        cliclack::confirm("Initialize git repository?").initial_value(git_available)
    );

    Ok(Some(config))
}

async fn load_store<C: ProductConfig>(
    product: &C,
    template_dir: Option<PathBuf>,
    cli_version: &str,
) -> Result<TemplateStore> {
    let fetcher = TemplateFetcher::from_config(product, template_dir)?;
    match fetcher.source() {
        TemplateSource::Local(path) => tracing::debug!(path = %path.display(), "local templates"),
        TemplateSource::Archive(path) => {
            cliclack::log::info(format!("Using template archive {}", path.display()))?
        }
        TemplateSource::Remote(url) => {
            cliclack::log::info(format!("Using remote templates from {}", url))?
        }
    }

    let store = fetcher.store().await?;

    if let Some(manifest) = store.manifest() {
        if let Some(warning) =
            check_compatibility(cli_version, &manifest.version, product.upgrade_command())
        {
            cliclack::log::warning(warning)?;
        }
    }

    Ok(store)
}

async fn create_project(
    scaffolder: &Scaffolder,
    config: &ProjectConfig,
    skip_install: bool,
) -> Result<PathBuf> {
    let spinner = cliclack::spinner();
    spinner.start("Scaffolding project...");
    let root = match scaffolder.scaffold(config).await {
        Ok(root) => root,
        Err(e) => {
            spinner.error("Failed");
            return Err(e.into());
        }
    };
    spinner.stop("Project scaffolded!");

    if !skip_install {
        // Inherited package manager output would fight with a live spinner
        cliclack::log::step("Installing dependencies...")?;
        process::install_dependencies(&root, config.package_manager).await?;
        cliclack::log::success("Dependencies installed!")?;
    }

    if config.git_init {
        let spinner = cliclack::spinner();
        spinner.start("Initializing git...");
        if let Err(e) = process::init_git(&root).await {
            spinner.error("Failed");
            return Err(e.into());
        }
        spinner.stop("Git initialized!");
    }

    Ok(root)
}

fn print_next_steps<C: ProductConfig>(product: &C, config: &ProjectConfig, model: &ConfigModel) {
    println!();
    println!("{}", style("Next steps:").bold());
    for step in product.next_steps(config, model) {
        println!("  {}", step);
    }
    println!();

    if let Some(note) = product.closing_note() {
        println!("{}", style(note).dim());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Components, Styling};

    #[test]
    fn test_yes_or_preset_skips_prompts() {
        assert!(!CreateArgs::default().non_interactive());
        assert!(CreateArgs {
            yes: true,
            ..Default::default()
        }
        .non_interactive());
        assert!(CreateArgs {
            preset: Some(Preset::Web),
            ..Default::default()
        }
        .non_interactive());
    }

    #[test]
    fn test_prompt_labels_for_none_values() {
        assert_eq!(plain_label(Styling::None.as_str()), "None");
        assert_eq!(plain_label(Components::Shadcn.as_str()), "shadcn");
    }
}
