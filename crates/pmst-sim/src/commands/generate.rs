use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use pmst_core::rng::RngHandle;
use pmst_core::CostType;
use pmst_graph::{canonical_hash, gen_complete, gen_random_connected, graph_to_json, Graph};
use tracing::info;

use super::unsupported_dims;

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Number of nodes.
    #[arg(long)]
    pub nodes: usize,
    /// Cost dimensions (2 or 3).
    #[arg(long, default_value_t = 2)]
    pub dims: usize,
    /// Seed of the generator.
    #[arg(long)]
    pub seed: u64,
    /// Largest cost component; components are drawn from `1..=max_cost`.
    #[arg(long, default_value_t = 100)]
    pub max_cost: CostType,
    /// Probability of each non-tree edge in a random connected graph.
    #[arg(long, default_value_t = 0.3)]
    pub probability: f64,
    /// Emits a complete graph instead of a random connected one.
    #[arg(long)]
    pub complete: bool,
    /// Output JSON path.
    #[arg(long)]
    pub out: PathBuf,
}

pub fn run(args: &GenerateArgs) -> Result<(), Box<dyn Error>> {
    match args.dims {
        2 => generate_with::<2>(args),
        3 => generate_with::<3>(args),
        other => Err(unsupported_dims(other)),
    }
}

fn generate_with<const D: usize>(args: &GenerateArgs) -> Result<(), Box<dyn Error>> {
    let mut rng = RngHandle::from_seed(args.seed);
    let graph: Graph<D> = if args.complete {
        gen_complete(args.nodes, args.max_cost, &mut rng)?
    } else {
        gen_random_connected(args.nodes, args.probability, args.max_cost, &mut rng)?
    };
    if let Some(parent) = args.out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(&args.out, graph_to_json(&graph)?)?;
    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        dims = D,
        hash = %canonical_hash(&graph),
        "graph written"
    );
    println!("{}", args.out.display());
    Ok(())
}
