//! CLI binary entry point for fmfexporter

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand, ValueEnum};
#[cfg(feature = "cli")]
use fmf_exporter::adapter::{AdapterRegistry, ExportSettings};
#[cfg(feature = "cli")]
use fmf_exporter::cli::commands::polarion::{
    PolarionArgs, handle_generate_config, handle_polarion,
};
#[cfg(feature = "cli")]
use fmf_exporter::cli::error::CliError;
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "fmfexporter")]
#[command(about = "Export FMF test case metadata into ALM tools")]
#[command(version)]
struct Cli {
    /// FMF Tree path containing your test cases
    #[arg(short, long, required_unless_present = "show_scheme")]
    path: Option<PathBuf>,

    /// FMF Test Case filter (by name), may be repeated
    #[arg(long = "tc")]
    tc: Vec<String>,

    /// Logging level to use
    #[arg(long, value_enum, default_value = "INFO")]
    log_level: LogLevel,

    /// Show metadata scheme
    #[arg(long)]
    show_scheme: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[cfg(feature = "cli")]
#[derive(Clone, Copy, ValueEnum)]
enum LogLevel {
    #[value(name = "WARNING")]
    Warning,
    #[value(name = "INFO")]
    Info,
    #[value(name = "DEBUG")]
    Debug,
}

#[cfg(feature = "cli")]
impl LogLevel {
    fn directive(self) -> &'static str {
        match self {
            LogLevel::Warning => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        }
    }
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Export test cases to Polarion
    Polarion {
        /// Polarion config file
        #[arg(short, long, required_unless_present = "generate_config", conflicts_with = "generate_config")]
        config: Option<PathBuf>,
        /// Generate a sample config file using provided file name
        #[arg(long)]
        generate_config: Option<PathBuf>,
        /// Submit all matching test cases into Polarion, otherwise they are dumped
        #[arg(long)]
        submit: bool,
        /// Send test cases to Polarion one by one
        #[arg(long)]
        one_by_one: bool,
        /// Populate Test Work Item in JIRA if linked defect is present
        #[arg(long)]
        jira_populate_tc: bool,
        /// Configuration file for the JIRA project
        #[arg(long)]
        jira_config: Option<PathBuf>,
        /// Also write the generated document as testcase.xml into this directory
        #[arg(long, num_args = 0..=1, default_missing_value = ".")]
        save_xml: Option<PathBuf>,
    },
}

#[cfg(feature = "cli")]
fn init_logging(level: LogLevel) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.directive()));
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

#[cfg(feature = "cli")]
fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_level);

    if cli.show_scheme {
        println!("{}", fmf_exporter::scheme::METADATA_SCHEME);
        return;
    }

    let result = match cli.command {
        Some(Commands::Polarion {
            config,
            generate_config,
            submit,
            one_by_one,
            jira_populate_tc,
            jira_config,
            save_xml,
        }) => {
            if let Some(path) = generate_config {
                match handle_generate_config(&path) {
                    Ok(()) => std::process::exit(0),
                    Err(e) => Err(e),
                }
            } else {
                let args = PolarionArgs {
                    tree_path: cli.path.unwrap_or_else(|| PathBuf::from(".")),
                    filters: cli.tc,
                    settings: ExportSettings {
                        config,
                        submit,
                        one_by_one,
                        jira_populate: jira_populate_tc,
                        jira_config,
                        save_xml,
                    },
                };
                handle_polarion(&args).map(|_| ())
            }
        }
        None => Err(CliError::InvalidArgument(format!(
            "No adapter selected. Use one of: {}",
            AdapterRegistry::with_builtin().ids().join(", ")
        ))),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature is not enabled. Build with --features cli");
    std::process::exit(1);
}
