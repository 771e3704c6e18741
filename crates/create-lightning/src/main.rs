//! create-lightning-scaffold - Scaffold projects with LazorKit SDK integration

use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use lightning_core::{CreateArgs, Outcome, Preset, ProductConfig};
use std::path::PathBuf;
use std::process::ExitCode;

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Lightning product configuration
#[derive(Clone)]
pub struct LightningConfig;

impl ProductConfig for LightningConfig {
    fn name(&self) -> &'static str {
        "create-lightning-scaffold"
    }

    fn display_name(&self) -> &'static str {
        "create-lightning-scaffold"
    }

    fn default_project_name(&self) -> &'static str {
        "my-lightning-app"
    }

    fn template_dir_env(&self) -> &'static str {
        "LIGHTNING_TEMPLATE_DIR"
    }

    fn template_url_env(&self) -> &'static str {
        "LIGHTNING_TEMPLATE_URL"
    }

    fn bundled_template_dir(&self) -> Option<PathBuf> {
        // Installed layout: templates/ next to the executable
        let beside_exe = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join("templates")));
        let source_tree = PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/../../templates"));

        beside_exe
            .into_iter()
            .chain(std::iter::once(source_tree))
            .find(|dir| dir.is_dir())
    }

    fn cli_description(&self) -> &'static str {
        "Scaffold projects with LazorKit SDK integration"
    }

    fn upgrade_command(&self) -> &'static str {
        "cargo install create-lightning-scaffold --force"
    }

    fn closing_note(&self) -> Option<&'static str> {
        Some("LazorKit examples included: passkey-login, gasless-transfer, biometric-onboard")
    }
}

#[derive(Parser, Debug)]
#[command(name = "create-lightning-scaffold")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Args {
    #[command(flatten)]
    pub create: CliCreateArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Pack the template store into a zip archive (for development use)
    PackTemplates(PackArgs),
}

#[derive(Parser, Debug)]
pub struct CliCreateArgs {
    /// Use defaults
    #[arg(short, long)]
    pub yes: bool,

    /// Project name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Preset (skips the prompts)
    #[arg(short, long, value_enum)]
    pub preset: Option<Preset>,

    /// Skip dependency installation
    #[arg(long = "skip-install")]
    pub skip_install: bool,

    /// Template store directory or .zip archive to use instead of the bundled one
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,
}

impl From<CliCreateArgs> for CreateArgs {
    fn from(args: CliCreateArgs) -> Self {
        CreateArgs {
            template_dir: args.template_dir,
            name: args.name,
            preset: args.preset,
            yes: args.yes,
            skip_install: args.skip_install,
        }
    }
}

#[derive(Parser, Debug)]
pub struct PackArgs {
    /// Template store directory to pack
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Archive path to write
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Command definition with the product's description as help text
fn cli_command<C: ProductConfig>(config: &C) -> clap::Command {
    Args::command().about(config.cli_description())
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Ctrl+C outside a prompt
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let config = LightningConfig;
    let matches = cli_command(&config).get_matches();
    let args = match Args::from_arg_matches(&matches) {
        Ok(args) => args,
        Err(e) => e.exit(),
    };

    match args.command {
        Some(Command::PackTemplates(pack)) => {
            match lightning_core::templates::pack_templates(
                &config,
                pack.template_dir.as_deref(),
                pack.output.as_deref(),
            ) {
                Ok(_) => ExitCode::SUCCESS,
                Err(e) => {
                    eprintln!("Error: {:#}", e);
                    ExitCode::FAILURE
                }
            }
        }
        None => {
            let result = lightning_core::run(&config, args.create.into(), CLI_VERSION).await;

            // Ensure cursor is visible on normal exit
            let _ = console::Term::stderr().show_cursor();

            match result {
                Ok(Outcome::Created(_)) | Ok(Outcome::Cancelled) => ExitCode::SUCCESS,
                Err(e) => {
                    let _ = cliclack::outro_cancel(format!("Error: {:#}", e));
                    ExitCode::FAILURE
                }
            }
        }
    }
}
