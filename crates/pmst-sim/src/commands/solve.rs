use std::collections::BTreeMap;
use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Args;
use pmst_core::{CostVector, EdgeId, RunProvenance};
use pmst_graph::{canonical_hash, graph_from_json, preprocess, CompactGraph, PreprocessReport};
use pmst_search::{solve, Algorithm, RunConfig, RunStats};
use serde::Serialize;
use tracing::{info, warn};

use super::{read_graph_text, unsupported_dims, write_json};

#[derive(Args, Debug)]
pub struct SolveArgs {
    /// JSON graph produced by `pmst-sim generate` or any compatible writer.
    #[arg(long)]
    pub graph: PathBuf,
    /// YAML run configuration; defaults apply when omitted.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Output directory for `report.json` and the resolved `config.yaml`.
    #[arg(long, default_value = "pmst-out")]
    pub out: PathBuf,
    /// Overrides `search.algorithm` from the configuration.
    #[arg(long)]
    pub algorithm: Option<Algorithm>,
    /// Searches the input graph without red/blue classification.
    #[arg(long)]
    pub no_preprocess: bool,
    /// Includes the edge list of every Pareto-optimal tree in the report.
    #[arg(long)]
    pub trees: bool,
}

#[derive(Debug, Serialize)]
struct FrontEntry<const D: usize> {
    cost: CostVector<D>,
    #[serde(skip_serializing_if = "Option::is_none")]
    edges: Option<Vec<EdgeId>>,
}

#[derive(Debug, Serialize)]
struct SolveReport<const D: usize> {
    provenance: RunProvenance,
    #[serde(skip_serializing_if = "Option::is_none")]
    preprocessing: Option<PreprocessReport>,
    searched_nodes: usize,
    searched_edges: usize,
    stats: RunStats,
    front: Vec<FrontEntry<D>>,
}

pub fn run(args: &SolveArgs) -> Result<(), Box<dyn Error>> {
    let (text, dims) = read_graph_text(&args.graph)?;
    match dims {
        2 => solve_with::<2>(args, &text),
        3 => solve_with::<3>(args, &text),
        other => Err(unsupported_dims(other)),
    }
}

fn load_config<const D: usize>(args: &SolveArgs) -> Result<RunConfig<D>, Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => RunConfig::from_yaml(&fs::read_to_string(path)?)?,
        None => RunConfig::default(),
    };
    if let Some(algorithm) = args.algorithm {
        config.search.algorithm = algorithm;
    }
    if args.no_preprocess {
        config.preprocess = false;
    }
    config.validate()?;
    Ok(config)
}

fn solve_with<const D: usize>(args: &SolveArgs, text: &str) -> Result<(), Box<dyn Error>> {
    let config = load_config::<D>(args)?;
    let mut graph = graph_from_json::<D>(text)?;
    let graph_hash = canonical_hash(&graph);
    if !graph.is_connected() {
        warn!(nodes = graph.node_count(), "input graph is disconnected; the front is empty");
    }

    let preprocessing = if config.preprocess {
        Some(preprocess(&mut graph)?)
    } else {
        graph.clear_flags();
        None
    };
    let compact = CompactGraph::contract(&graph)?;
    info!(
        nodes = graph.node_count(),
        searched_nodes = compact.graph().node_count(),
        searched_edges = compact.graph().edge_count(),
        "search input prepared"
    );

    let outcome = solve(compact.graph(), &config.search)?;
    let mut front = Vec::with_capacity(outcome.solution_count());
    for (idx, solution) in outcome.solutions().iter().enumerate() {
        let edges = if args.trees {
            Some(compact.expand_tree(&outcome.tree(idx)?)?)
        } else {
            None
        };
        front.push(FrontEntry {
            cost: compact.total_cost(&solution.cost)?,
            edges,
        });
    }

    let mut tool_versions = BTreeMap::new();
    tool_versions.insert("pmst-sim".to_string(), env!("CARGO_PKG_VERSION").to_string());
    let report = SolveReport {
        provenance: RunProvenance {
            graph_hash,
            config_hash: config.hash()?,
            algorithm: outcome.algorithm().to_string(),
            dims: D,
            seed: None,
            tool_versions,
        },
        preprocessing,
        searched_nodes: compact.graph().node_count(),
        searched_edges: compact.graph().edge_count(),
        stats: outcome.stats().clone(),
        front,
    };

    fs::create_dir_all(&args.out)?;
    write_json(&args.out.join("report.json"), &report)?;
    fs::write(args.out.join("config.yaml"), config.to_yaml()?)?;
    println!(
        "{}: {} Pareto-optimal trees, {} extractions, {:.3}s -> {}",
        report.provenance.algorithm,
        report.stats.solutions,
        report.stats.extractions,
        report.stats.elapsed_secs,
        args.out.join("report.json").display()
    );
    Ok(())
}
