//! CLI entry point for the photomosaic builder

use clap::Parser;
use photomosaic::io::cli::{Cli, FileProcessor};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> photomosaic::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| cli.default_log_filter().into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    let mut processor = FileProcessor::new(cli);
    processor.process()
}
