//! token-counter: print how many times each line occurs in a file.

use clap::Parser;
use std::path::PathBuf;
use token_counter::config::{
    DEFAULT_INITIAL_SIZE_BITS, DEFAULT_PROBE_LIMIT, DEFAULT_SIZE_BITS_LIMIT,
};
use token_counter::CounterConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "token-counter")]
#[command(about = "Count occurrences of each line in a file")]
#[command(version)]
struct Args {
    /// Input file; every line (terminator stripped) is one token
    #[arg(value_name = "PATH")]
    path: PathBuf,

    /// Initial table size as a power of two
    #[arg(long, default_value_t = DEFAULT_INITIAL_SIZE_BITS, env = "TOKEN_COUNTER_INITIAL_BITS")]
    initial_bits: u32,

    /// Table size (power of two) that growth may not reach
    #[arg(long, default_value_t = DEFAULT_SIZE_BITS_LIMIT, env = "TOKEN_COUNTER_MAX_BITS")]
    max_bits: u32,

    /// Extra probes per key before the table grows
    #[arg(long, default_value_t = DEFAULT_PROBE_LIMIT, env = "TOKEN_COUNTER_PROBE_LIMIT")]
    probe_limit: u32,

    /// Enable debug logging
    #[arg(short, long, env = "TOKEN_COUNTER_DEBUG")]
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Logs go to stderr; stdout carries only counts.
    let log_level = if args.debug { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("token_counter={log_level}").into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = CounterConfig {
        initial_size_bits: args.initial_bits,
        size_bits_limit: args.max_bits,
        probe_limit: args.probe_limit,
    };
    tracing::debug!(?config, path = %args.path.display(), "starting");

    token_counter::run(&args.path, config, std::io::stdout().lock())?;
    Ok(())
}
