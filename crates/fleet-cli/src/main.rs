use clap::Parser;
use fleet_cli::cli::{Cli, Commands};
use tracing::error;
use tracing_subscriber::FmtSubscriber;

mod commands;

fn main() {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("setting default subscriber failed: {err}");
    }

    let result = match &cli.command {
        Commands::Plan {
            config,
            out,
            json,
            solver,
        } => commands::plan::handle(config.as_deref(), out, json.as_deref(), *solver),
        Commands::Validate { config } => commands::validate::handle(config.as_deref()),
        Commands::Inspect { config, kind } => commands::inspect::handle(config.as_deref(), *kind),
        Commands::Completions { shell, out } => {
            commands::completions::handle(*shell, out.as_deref())
        }
    };

    if let Err(err) = result {
        error!("{err:#}");
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
