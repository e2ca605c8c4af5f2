#![allow(dead_code)]

pub mod fixtures;

use arbor::{DocumentBuilder, Node, Nodes, Source};
use std::path::{Path, PathBuf};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Opt-in log output for a test run (`RUST_LOG=arbor_tree=trace`).
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Absolute path of a file under `tests/data`.
pub fn data_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

/// Loads a fixture file with format detection.
pub fn load(name: &str) -> Source {
    init_logging();
    DocumentBuilder::new()
        .from_file(data_path(name))
        .unwrap_or_else(|e| panic!("failed to load fixture {name}: {e}"))
}

/// Names of the matched nodes, in result order.
pub fn names(nodes: &Nodes<'_, '_>) -> Vec<String> {
    nodes
        .iter()
        .map(|n| n.name().unwrap_or("#data").to_string())
        .collect()
}

/// `id` attributes of the matched nodes, in result order.
pub fn id_attributes(nodes: &Nodes<'_, '_>) -> Vec<String> {
    nodes
        .iter()
        .filter_map(|n| n.attribute("id").map(str::to_string))
        .collect()
}

/// Asserts both the number of matches and their concatenated data.
pub fn assert_query(root: &Node<'_, '_>, selector: &str, count: usize, data: Option<&str>) {
    let nodes = root
        .find(selector)
        .unwrap_or_else(|e| panic!("'{selector}' failed: {e}"));
    assert_eq!(
        nodes.len(),
        count,
        "expected {count} node(s) from '{selector}', got {:?}",
        names(&nodes)
    );
    assert_eq!(
        nodes.data().as_deref(),
        data,
        "unexpected data from '{selector}'"
    );
}
