use cachescope_recorder::WatcherConfig;
use replay::RecordTarget;
use clap::Subcommand;
use std::path::{Path, PathBuf};

pub mod check;
pub mod replay;

#[derive(Subcommand)]
pub enum Commands {
    /// Replay a JSON-lines stream of cache events through the recorder
    Replay {
        /// Event file to read, or `-` for stdin
        #[arg(short, long, default_value = "-")]
        input: String,

        /// Append records to this JSON-lines file instead of printing them
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Emit records as log events on stderr instead of printing them
        #[arg(long, conflicts_with = "output")]
        log_records: bool,

        /// Watcher configuration file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Correlation id attached to every record as its batch id
        #[arg(long)]
        correlation_id: Option<String>,
    },

    /// Report whether keys would be recorded or ignored
    Check {
        /// Watcher configuration file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Keys to check
        #[arg(required = true)]
        keys: Vec<String>,
    },
}

impl Commands {
    pub async fn execute(self) -> anyhow::Result<()> {
        match self {
            Commands::Replay {
                input,
                output,
                log_records,
                config,
                correlation_id,
            } => {
                let config = load_config(config.as_deref())?;
                let target = match output {
                    Some(path) => RecordTarget::File(path),
                    None if log_records => RecordTarget::Log,
                    None => RecordTarget::Stdout,
                };
                replay::execute(&input, target, config, correlation_id).await
            }
            Commands::Check { config, keys } => {
                let config = load_config(config.as_deref())?;
                check::execute(&config, &keys)
            }
        }
    }
}

/// Load watcher configuration from a file when given, then apply the environment
fn load_config(path: Option<&Path>) -> anyhow::Result<WatcherConfig> {
    let base = match path {
        Some(path) => WatcherConfig::from_json_file(path)?,
        None => WatcherConfig::default(),
    };
    Ok(base.merge_env()?)
}
