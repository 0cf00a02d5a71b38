use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::runtime::Runtime;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use storyweaver::StoryError;
use storyweaver::cli::commands::{serve::ServeOptions, weave::WeaveOptions};

#[derive(Parser)]
#[command(name = "storyweaver")]
#[command(
    version,
    about = "Gemini-powered short stories set on the Sanjay Ghodawat University campus"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, global = true)]
    verbose: bool,

    #[arg(long, short, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the story form in the browser
    Serve {
        #[arg(long, help = "Address to bind (overrides config)")]
        host: Option<String>,
        #[arg(long, short, help = "Port to listen on (overrides config)")]
        port: Option<u16>,
    },

    /// Weave a single story from the terminal
    Weave {
        #[arg(help = "What the story should be about")]
        idea: String,
        #[arg(long, short, help = "Save the story as a timestamped .txt file")]
        save: bool,
        #[arg(long, short, help = "Directory for the saved story (default: current)")]
        output: Option<PathBuf>,
    },

    /// List generation models and show the selection
    Models {
        #[arg(
            short = 'f',
            long,
            default_value = "text",
            help = "Output format: text, json"
        )]
        format: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration (merged from all sources)
    Show {
        #[arg(
            short = 'f',
            long,
            default_value = "toml",
            help = "Output format: toml, json"
        )]
        format: String,
        #[arg(long, help = "Read only this file on top of the defaults")]
        file: Option<PathBuf>,
    },
    /// Show configuration file paths
    Path,
    /// Initialize configuration
    Init {
        #[arg(long, short, help = "Initialize global config")]
        global: bool,
        #[arg(long, help = "Overwrite existing config")]
        force: bool,
    },
}

/// Set up panic handler for graceful error reporting
fn setup_panic_handler() {
    let default_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info| {
        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        eprintln!("\n\x1b[1;31m━━━ PANIC ━━━\x1b[0m");
        eprintln!("\x1b[31mStory Weaver encountered an unexpected error:\x1b[0m");
        eprintln!("  {}", message);

        if let Some(location) = panic_info.location() {
            eprintln!(
                "\x1b[90mLocation: {}:{}:{}\x1b[0m",
                location.file(),
                location.line(),
                location.column()
            );
        }
        eprintln!();

        // Backtrace when RUST_BACKTRACE=1
        default_hook(panic_info);
    }));
}

fn main() -> ExitCode {
    setup_panic_handler();

    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError:\x1b[0m {}", e);
            if let Some(err) = e.downcast_ref::<StoryError>()
                && err.is_fatal()
            {
                eprintln!("\nRun 'storyweaver config path' to see where settings are read from.");
            }
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> anyhow::Result<()> {
    // A local .env may carry GEMINI_API_KEY
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Serve { host, port } => {
            let rt = Runtime::new()?;
            rt.block_on(storyweaver::cli::commands::serve::run(ServeOptions {
                host,
                port,
            }))?;
        }
        Commands::Weave { idea, save, output } => {
            let rt = Runtime::new()?;
            rt.block_on(storyweaver::cli::commands::weave::run(WeaveOptions {
                idea,
                save,
                output,
            }))?;
        }
        Commands::Models { format } => {
            let rt = Runtime::new()?;
            rt.block_on(storyweaver::cli::commands::models::run(&format))?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show { format, file } => {
                storyweaver::cli::commands::config::show(&format, file.as_deref())?;
            }
            ConfigAction::Path => {
                storyweaver::cli::commands::config::path()?;
            }
            ConfigAction::Init { global, force } => {
                storyweaver::cli::commands::config::init(global, force)?;
            }
        },
    }

    Ok(())
}
