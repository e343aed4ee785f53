use clap::Parser;
use tracing_subscriber::EnvFilter;

use chromdetect::cli;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("chromdetect=debug,info")
    } else {
        EnvFilter::new("chromdetect=warn")
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        cli::Commands::Classify(args) => {
            cli::classify::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Batch(args) => {
            cli::batch::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Compare(args) => {
            cli::compare::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Telomeres(args) => {
            cli::telomeres::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Patterns(args) => {
            cli::patterns::run(args, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
