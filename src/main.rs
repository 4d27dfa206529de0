use clap::Parser;
use miette::Result;
use npconvert::cli::{Cli, Commands};
use npconvert::output::Printer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let printer = Printer::new();

    match cli.command {
        Commands::Convert(args) => npconvert::cli::convert::run(args, &printer)?,
        Commands::Check(args) => npconvert::cli::check::run(args, &printer)?,
        Commands::Init(args) => npconvert::cli::init::run(args, &printer)?,
        Commands::Completions(args) => npconvert::cli::completions::run(args)?,
    }

    Ok(())
}

/// Log to stderr. `RUST_LOG` takes precedence over `-v`.
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "npconvert=debug",
        _ => "npconvert=trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
