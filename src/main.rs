// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, debug, error, info};
use std::io::Write;
use std::path::Path;
use tokio::io::BufReader;

use signflow::app_config::{self, Config, TranslationProvider};
use signflow::app_controller::Controller;

/// CLI Wrapper for TranslationProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranslationProvider {
    Analyze,
    Lexicon,
}

impl From<CliTranslationProvider> for TranslationProvider {
    fn from(cli_provider: CliTranslationProvider) -> Self {
        match cli_provider {
            CliTranslationProvider::Analyze => TranslationProvider::Analyze,
            CliTranslationProvider::Lexicon => TranslationProvider::Lexicon,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate one transcript and play its gestures
    Play {
        /// Transcript text; several words are joined with spaces
        #[arg(value_name = "TRANSCRIPT", required = true)]
        transcript: Vec<String>,
    },

    /// Read transcripts and `:commands` from stdin, one per line
    Listen,

    /// Generate shell completions for signflow
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// SignFlow - speech transcripts to sign language gestures
#[derive(Parser, Debug)]
#[command(name = "signflow")]
#[command(version = "0.1.0")]
#[command(about = "Plays sign language gesture clips for spoken transcripts")]
#[command(long_about = "SignFlow translates transcripts into sequences of sign language gesture clips and plays them in order.

EXAMPLES:
    signflow play hello how are you            # Translate and play one transcript
    signflow -p lexicon play thank you         # Use the offline word list
    signflow listen                            # Interactive session on stdin
    signflow completions bash > signflow.bash  # Generate bash completions

LISTEN COMMANDS:
    :play  :pause  :next  :prev  :translate on|off  :status  :quit

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Translation provider to use
    #[arg(short, long, value_enum, global = true)]
    provider: Option<CliTranslationProvider>,

    /// Analyze service base URL
    #[arg(short, long, global = true, env = "SIGNFLOW_ENDPOINT")]
    endpoint: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color code for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌",
            Level::Warn => "🚧",
            Level::Info => "🤟",
            Level::Debug => "🔍",
            Level::Trace => "📋",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                Self::get_emoji_for_level(record.level()),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with trace so max_level alone controls verbosity
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "signflow", &mut std::io::stdout());
        return Ok(());
    }

    let controller = Controller::with_config(load_config(&cli)?)?;
    debug!(
        "Using {} provider",
        controller.config().translation.provider.display_name()
    );

    match cli.command {
        Commands::Play { transcript } => {
            let transcript = transcript.join(" ");
            match controller.run_once(&transcript).await {
                Ok(session) => {
                    info!("{}", session.status_line());
                    Ok(())
                }
                Err(e) => {
                    error!("{}", e);
                    Err(anyhow!("Playback failed"))
                }
            }
        }
        Commands::Listen => {
            info!("Listening on stdin; type a transcript or :quit");
            let summary = controller.listen(BufReader::new(tokio::io::stdin())).await?;
            info!(
                "Session ended: {} translated, {} skipped, {} cycles completed",
                summary.admitted, summary.declined, summary.cycles_completed
            );
            Ok(())
        }
        Commands::Completions { .. } => Ok(()),
    }
}

// Load config from disk and apply command line overrides
fn load_config(cli: &CommandLineOptions) -> Result<Config> {
    if let Some(level) = &cli.log_level {
        let level: app_config::LogLevel = level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let mut config = Config::load_or_create(Path::new(&cli.config_path))?;

    if let Some(provider) = &cli.provider {
        config.translation.provider = provider.clone().into();
    }

    if let Some(endpoint) = &cli.endpoint {
        config.translation.endpoint = endpoint.clone();
    }

    match &cli.log_level {
        Some(level) => config.log_level = level.clone().into(),
        // Config file decides when the command line didn't
        None => log::set_max_level(config.log_level.to_level_filter()),
    }

    Ok(config)
}
