use clap::Parser;

mod commands;
mod logging;
mod stdout_sink;

use commands::Commands;

#[derive(Parser)]
#[command(name = "cachescope")]
#[command(about = "Turn cache events into normalized, tagged records", long_about = None)]
#[command(version)]
struct Cli {
    /// Log at debug level unless CACHESCOPE_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;
    cli.command.execute().await
}
