use anyhow::Context;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

use strokepick::config::{Config, SelectionPolicy};
use strokepick::{LassoEngine, trace};

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("STROKEPICK_GIT_HASH"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "strokepick")]
#[command(
    version = VERSION,
    about = "Freehand lasso selection engine for pointer-driven item lists"
)]
struct Cli {
    /// Gesture trace to replay (JSON, optionally gzip-compressed)
    trace: Option<PathBuf>,

    /// Override the selection policy (additive or toggle)
    #[arg(long, short = 'p', value_name = "POLICY")]
    policy: Option<String>,

    /// Track every contact of a multi-touch trace
    #[arg(long, short = 'm', action = ArgAction::SetTrue)]
    multi_pointer: bool,

    /// Create a default config file and exit
    #[arg(long, action = ArgAction::SetTrue)]
    init_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    if cli.init_config {
        Config::create_default_file()?;
        println!(
            "Created default config at {}",
            Config::get_config_path()?.display()
        );
        return Ok(());
    }

    let Some(trace_path) = cli.trace else {
        // No trace: show usage
        println!("strokepick: freehand lasso selection engine");
        println!();
        println!("Usage:");
        println!("  strokepick <TRACE>         Replay a recorded gesture trace");
        println!("  strokepick --init-config   Create a default config file");
        println!("  strokepick --help          Show help");
        println!();
        println!("A trace is a JSON file (optionally .gz) holding the item layout");
        println!("and the recorded pointer frames of one selection session.");
        println!("The replayed selection is printed to stdout.");
        return Ok(());
    };

    let mut config = Config::load()?;

    if let Some(policy) = cli.policy.as_deref() {
        config.selection.policy = match policy {
            "additive" => SelectionPolicy::Additive,
            "toggle" => SelectionPolicy::Toggle,
            other => {
                return Err(anyhow::anyhow!(
                    "unknown policy '{other}' (expected 'additive' or 'toggle')"
                ));
            }
        };
    }
    if cli.multi_pointer {
        config.pointer.multi_pointer = true;
    }

    let recorded = trace::load_trace(&trace_path)
        .with_context(|| format!("Failed to load trace from {}", trace_path.display()))?;

    let mut engine = LassoEngine::new(&config);
    let stats = trace::replay(&recorded, &mut engine);

    log::info!(
        "Replayed {} frames ({} stroke segments)",
        stats.frames,
        stats.segments
    );

    println!("{}", engine.selection_summary());
    if !engine.selection().is_empty() {
        let indices: Vec<String> = engine
            .selection()
            .iter()
            .map(|item| item.to_string())
            .collect();
        println!("selection: {}", indices.join(" "));
    }

    Ok(())
}
