pub mod compare;
pub mod generate;
pub mod solve;
pub mod version;

use std::error::Error;
use std::fs;
use std::path::Path;

use pmst_core::errors::{ErrorInfo, PmstError};
use pmst_graph::json_dims;
use serde::Serialize;

/// Reads a graph file and returns its text with the declared number of cost dimensions.
pub fn read_graph_text(path: &Path) -> Result<(String, usize), Box<dyn Error>> {
    let text = fs::read_to_string(path)?;
    let dims = json_dims(&text)?;
    Ok((text, dims))
}

pub fn unsupported_dims(dims: usize) -> Box<dyn Error> {
    Box::new(PmstError::Config(
        ErrorInfo::new("unsupported-dims", "graph dimension is not supported by this build")
            .with_context("dims", dims)
            .with_hint("use a graph with 2 or 3 cost dimensions"),
    ))
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut bytes = serde_json::to_vec_pretty(value)?;
    bytes.push(b'\n');
    fs::write(path, bytes)?;
    Ok(())
}
