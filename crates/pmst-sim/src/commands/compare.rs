use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use pmst_core::errors::{ErrorInfo, PmstError};
use pmst_graph::{graph_from_json, preprocess, CompactGraph};
use pmst_search::{AlternativeSearch, PrimarySearch, SearchConfig};

use super::{read_graph_text, unsupported_dims};

#[derive(Args, Debug)]
pub struct CompareArgs {
    /// JSON graph to search.
    #[arg(long)]
    pub graph: PathBuf,
    /// Contracts blue components and drops red edges first.
    #[arg(long)]
    pub preprocess: bool,
}

pub fn run(args: &CompareArgs) -> Result<(), Box<dyn Error>> {
    let (text, dims) = read_graph_text(&args.graph)?;
    match dims {
        2 => compare_with::<2>(args, &text),
        3 => compare_with::<3>(args, &text),
        other => Err(unsupported_dims(other)),
    }
}

fn compare_with<const D: usize>(args: &CompareArgs, text: &str) -> Result<(), Box<dyn Error>> {
    let mut graph = graph_from_json::<D>(text)?;
    if args.preprocess {
        preprocess(&mut graph)?;
    } else {
        graph.clear_flags();
    }
    let compact = CompactGraph::contract(&graph)?;
    let config = SearchConfig::<D>::default();

    let primary = PrimarySearch::new(compact.graph(), &config)?.run()?;
    let alternative = AlternativeSearch::new(compact.graph(), &config)?.run()?;
    let (left, right) = (primary.sorted_costs(), alternative.sorted_costs());
    println!(
        "primary: {} trees in {:.3}s, alternative: {} trees in {:.3}s",
        left.len(),
        primary.stats().elapsed_secs,
        right.len(),
        alternative.stats().elapsed_secs
    );
    if left != right {
        let first_difference = left
            .iter()
            .zip(right.iter())
            .position(|(a, b)| a != b)
            .unwrap_or(left.len().min(right.len()));
        return Err(Box::new(PmstError::Search(
            ErrorInfo::new("front-mismatch", "search formulations disagree")
                .with_context("primary", left.len())
                .with_context("alternative", right.len())
                .with_context("first_difference", first_difference),
        )));
    }
    Ok(())
}
