use anyhow::Result;
use clap::Parser;
use ecosim_lib::app::App;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Custom config file path
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Stop after this many ticks (default: run until both species die out)
    #[arg(short, long)]
    ticks: Option<u64>,

    /// RNG seed, overriding the config file
    #[arg(short, long)]
    seed: Option<u64>,

    /// Log a progress line every N ticks (0 disables)
    #[arg(long, default_value_t = 100)]
    report_every: u64,

    /// Write the population history to this JSON file on exit
    #[arg(long)]
    history_out: Option<PathBuf>,

    /// Scenario keys applied before the first tick (p, o, f, b, n)
    #[arg(long, default_value = "")]
    keys: String,

    /// Write the default configuration to the config path and exit
    #[arg(long)]
    init_config: bool,
}

fn main() -> Result<()> {
    ecosim_core::init_logging();
    let args = Args::parse();

    if args.init_config {
        App::write_default_config(&args.config)?;
        println!("Wrote default configuration to {}", args.config.display());
        return Ok(());
    }

    let mut config = App::load_config(&args.config)?;
    if let Some(seed) = args.seed {
        config.world.seed = Some(seed);
    }

    let mut app = App::new(config)?.with_report_every(args.report_every);
    app.handle_keys(&args.keys);

    let summary = app.run(args.ticks);
    println!("{}", serde_json::to_string_pretty(&summary)?);

    if let Some(path) = &args.history_out {
        app.export_history(path)?;
    }
    Ok(())
}
