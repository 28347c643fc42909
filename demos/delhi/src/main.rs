//! delhi — interactive ambulance dispatch over a small Delhi road network.
//!
//! Loads location names and a distance matrix, then repeatedly asks for a
//! patient location and priority, dispatches the best ambulance, and prints
//! the candidates, route, and nearest hospital.  Every dispatch is appended
//! to `logs.txt`; the session totals go to `summary.txt` on exit.
//!
//! ```text
//! cargo run -p delhi
//! cargo run -p delhi -- --seed 7 --script 4:critical,6:normal,7:high --csv
//! ```

mod console;
mod input;

use std::io;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ad_core::{DispatchConfig, Priority, SimRng, VertexId};
use ad_dispatch::{DispatchError, Dispatcher, DispatcherBuilder, Request};
use ad_graph::{DijkstraRouter, load_graph};
use ad_output::{CsvWriter, DispatchOutputObserver, OutputWriter, TextLogWriter};

use console::ConsoleObserver;

// ── Constants ─────────────────────────────────────────────────────────────────

const DEFAULT_LOCATIONS: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/buildings.txt");
const DEFAULT_MATRIX:    &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/Dataset.txt");

// ── Arguments ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "delhi", about = "Ambulance route optimizer for a Delhi road network")]
struct Args {
    /// Location names, one per line.
    #[arg(long, default_value = DEFAULT_LOCATIONS)]
    locations: PathBuf,

    /// Whitespace-separated N×N distance matrix (-1 = no road).
    #[arg(long, default_value = DEFAULT_MATRIX)]
    matrix: PathBuf,

    /// Random seed.  Defaults to the current time.
    #[arg(long)]
    seed: Option<u64>,

    /// Hospital location indices.
    #[arg(long, value_delimiter = ',', default_values_t = vec![0u32, 3, 5])]
    hospitals: Vec<u32>,

    /// Starting location index of each ambulance.
    #[arg(long, value_delimiter = ',', default_values_t = vec![0u32, 3, 5])]
    units: Vec<u32>,

    /// Directory for logs.txt, summary.txt, and any other output files.
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Also write dispatches.csv and summary.csv.
    #[arg(long)]
    csv: bool,

    /// Also write dispatch.db.
    #[cfg(feature = "sqlite")]
    #[arg(long)]
    sqlite: bool,

    /// Skip the simulated patient feedback after each dispatch.
    #[arg(long)]
    no_feedback: bool,

    /// Non-interactive run: comma-separated `index:priority` pairs.
    #[arg(long, value_delimiter = ',')]
    script: Vec<String>,
}

type Session = Dispatcher<DijkstraRouter, SimRng>;
type Observer = ConsoleObserver<DispatchOutputObserver<Vec<Box<dyn OutputWriter>>>>;

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    // 1. Load the network.
    let graph = load_graph(&args.locations, &args.matrix).with_context(|| {
        format!(
            "cannot load network from {} and {}",
            args.locations.display(),
            args.matrix.display()
        )
    })?;

    console::header("AMBULANCE ROUTE OPTIMIZER - DELHI");
    console::matrix(&graph);

    // 2. Configure the session.
    let seed = args.seed.unwrap_or_else(clock_seed);
    let config = DispatchConfig {
        seed,
        hospitals:      args.hospitals.iter().copied().map(VertexId).collect(),
        unit_positions:   args.units.iter().copied().map(VertexId).collect(),
        patient_feedback: !args.no_feedback,
        ..DispatchConfig::default()
    };
    tracing::info!(seed, locations = graph.vertex_count(), "session starting");

    let mut dispatcher = DispatcherBuilder::new(config, graph, DijkstraRouter).build()?;

    // 3. Output backends.
    let writers = open_writers(&args)?;
    let mut observer = ConsoleObserver::new(
        &dispatcher.graph,
        DispatchOutputObserver::new(writers, &dispatcher.graph),
    );

    // 4. Run.
    if args.script.is_empty() {
        interactive(&mut dispatcher, &mut observer)?;
    } else {
        let requests = args
            .script
            .iter()
            .map(|entry| input::parse_script_entry(entry))
            .collect::<Result<Vec<_>>>()?;
        scripted(&mut dispatcher, &mut observer, requests)?;
    }

    // 5. Summary.
    dispatcher.finish(&mut observer);
    if let Some(e) = observer.inner_mut().take_error() {
        tracing::error!(error = %e, "some output could not be written");
        eprintln!("warning: output incomplete: {e}");
    }
    println!(
        "\nProgram ended. Logs saved to {} (seed {seed}).",
        args.output_dir.display()
    );
    Ok(())
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn open_writers(args: &Args) -> Result<Vec<Box<dyn OutputWriter>>> {
    let dir = &args.output_dir;
    std::fs::create_dir_all(dir).with_context(|| format!("cannot create {}", dir.display()))?;

    let mut writers: Vec<Box<dyn OutputWriter>> = vec![Box::new(TextLogWriter::new(dir)?)];
    if args.csv {
        writers.push(Box::new(CsvWriter::new(dir)?));
    }
    #[cfg(feature = "sqlite")]
    if args.sqlite {
        writers.push(Box::new(ad_output::SqliteWriter::new(dir)?));
    }
    Ok(writers)
}

// ── Session loops ─────────────────────────────────────────────────────────────

fn interactive(dispatcher: &mut Session, observer: &mut Observer) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let count = dispatcher.graph.vertex_count();

    loop {
        console::locations(&dispatcher.graph);
        console::unit_status(&dispatcher.graph, dispatcher.registry.units());

        let prompt = format!("\nEnter patient location index (0-{}): ", count - 1);
        let Some(answer) = input::prompt(&mut input, &prompt)? else {
            break;
        };
        let Some(vertex) = input::parse_index(&answer, count) else {
            println!("Invalid input. Try again.");
            continue;
        };

        let Some(answer) = input::prompt(&mut input, "Enter patient priority (Critical / High / Normal): ")? else {
            break;
        };
        let priority = Priority::parse_lenient(&answer);

        handle(dispatcher, observer, Request::new(vertex, priority))?;

        match input::prompt(&mut input, "\nFind another route? (Y/N): ")? {
            Some(answer) if input::wants_more(&answer) => {}
            _ => break,
        }
    }
    Ok(())
}

fn scripted(dispatcher: &mut Session, observer: &mut Observer, requests: Vec<Request>) -> Result<()> {
    for request in requests {
        console::unit_status(&dispatcher.graph, dispatcher.registry.units());
        println!("\nPatient at location {} ({})", request.vertex.0, request.priority);
        handle(dispatcher, observer, request)?;
    }
    Ok(())
}

/// One cycle.  Recoverable outcomes are reported on the console and the
/// session goes on; anything else ends it.
fn handle(dispatcher: &mut Session, observer: &mut Observer, request: Request) -> Result<()> {
    match dispatcher.handle(request, observer) {
        Ok(_) => Ok(()),
        Err(DispatchError::VertexOutOfRange { vertex, count }) => {
            println!("Invalid location {}: expected 0-{}.", vertex.0, count.saturating_sub(1));
            Ok(())
        }
        Err(e) if e.is_recoverable() => Ok(()),
        Err(e) => Err(e.into()),
    }
}
