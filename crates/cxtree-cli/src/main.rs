use clap::Parser;

mod bootstrap;
mod cli;
mod commands;
mod output;
mod progress;
mod ui;

fn main() {
    if let Err(error) = run() {
        eprintln!("cxtree error: {error:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let flags = cli.global_flags();
    ui::init(&flags);
    // Capability panics are counted as faults by the omission sink.
    cxtree_parser::quiet_capability_panics();

    match &cli.command {
        cli::Commands::Capabilities(args) => return commands::capabilities::handle(args),
        cli::Commands::Schema(args) => return commands::schema::handle(args),
        _ => {}
    }

    let config = bootstrap::load_config(&flags)?;
    match &cli.command {
        cli::Commands::Parse(args) => commands::parse::handle(args, &config, &flags),
        cli::Commands::Dump(args) => commands::dump::handle(args, &config, &flags),
        cli::Commands::Capabilities(_) | cli::Commands::Schema(_) => Ok(()),
    }
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("CXTREE_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
