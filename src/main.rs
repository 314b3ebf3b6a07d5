use std::fmt::Display;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use itertools::Itertools;
use tracing::info;
use tracing_subscriber::EnvFilter;

use bicolour::algorithms::GraphAlgorithms;
use bicolour::bipartite::{check, CheckOptions};
use bicolour::graph::*;
use bicolour::io::LoadFromFile;
use bicolour::labelgraph::LabelGraph;
use bicolour::report::{Report, DEFAULT_LABEL_KEY};
use bicolour::trace::{Step, StepKind};

/// Checks whether the graph in FILE is bipartite.
///
/// Exits with 0 if the graph is bipartite, 1 if it is not and 2 if the file could not be
/// loaded.
#[derive(Parser, Debug)]
#[command(name = "bicolour", version)]
struct Args {
    /// Graph file, `.txt` or gzipped `.gz`
    file: String,

    /// Print a JSON report instead of the summary
    #[arg(long)]
    json: bool,

    /// Record and print every colouring step
    #[arg(long)]
    steps: bool,

    /// Record and print at most this many steps, implies `--steps`
    #[arg(long, value_name = "N")]
    max_steps: Option<usize>,

    /// Attribute used to label the two partitions
    #[arg(long, default_value = DEFAULT_LABEL_KEY)]
    label_key: String,

    /// Log filter, e.g. `debug` or `bicolour=trace`
    #[arg(long, env = "BICOLOUR_LOG", default_value = "warn")]
    log_level: String,
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&args.log_level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match run(&args) {
        Ok(true) => ExitCode::from(0),
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}

fn run(args:&Args) -> anyhow::Result<bool> {
    let graph = LabelGraph::from_file(&args.file)
        .with_context(|| format!("failed to load `{}`", args.file))?;
    info!(file = %args.file, vertices = graph.num_vertices(), edges = graph.num_edges(), "loaded graph");

    let mut options = CheckOptions::new().record_steps(args.steps || args.max_steps.is_some());
    if let Some(limit) = args.max_steps {
        options = options.max_steps(limit);
    }
    let result = check(&graph, &options)
        .with_context(|| format!("`{}` is not a valid graph", args.file))?;

    if args.json {
        let report = Report::new(&graph, &result, &args.label_key);
        let json = serde_json::to_string_pretty(&report).context("failed to serialize report")?;
        println!("{json}");
        return Ok(result.is_bipartite())
    }

    if let Some(steps) = result.steps() {
        for (i, step) in steps.iter().enumerate() {
            println!("{:>4}  {}", i+1, describe(step));
        }
        if args.max_steps == Some(steps.len()) {
            println!("      ... stopped after {} steps", steps.len());
        }
        println!();
    }

    let verdict = if result.is_bipartite() { "bipartite" } else { "not bipartite" };
    println!("{}: {} ({} vertices, {} edges, {} components)",
             args.file, verdict, graph.num_vertices(), graph.num_edges(), graph.num_components());
    println!("  partition 0: {}", list(result.partition_zero()));
    println!("  partition 1: {}", list(result.partition_one()));
    if !result.is_bipartite() {
        println!("  conflicts:   {}", result.conflicts().iter().join(", "));
    }

    Ok(result.is_bipartite())
}

fn list<V: Display>(vertices:&[V]) -> String {
    if vertices.is_empty() {
        "∅".to_string()
    } else {
        vertices.iter().join(" ")
    }
}

fn describe<V: VertexId + Display>(step:&Step<V>) -> String {
    match (&step.kind, &step.edge) {
        (StepKind::ComponentRoot, _) => format!("root {}", step.vertex),
        (StepKind::ColourNeighbour, Some((u, v))) => {
            let colour = step.colours.get(v).map_or("?".to_string(), |c| c.to_string());
            format!("colour {v} with {colour} (from {u})")
        }
        (StepKind::Conflict, Some((u, v))) => format!("conflict {u} -- {v}"),
        (_, None) => format!("{:?} {}", step.kind, step.vertex),
    }
}
