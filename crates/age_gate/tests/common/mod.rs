#![allow(dead_code, reason = "Each test binary uses a different subset of helpers")]
use anyhow::{Context as _, Result};
use dom::{Document, NodeId};
use std::fs;
use std::path::PathBuf;

/// Directory holding the HTML and JSON fixtures for integration tests.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn read_fixture(name: &str) -> Result<String> {
    let path = fixtures_dir().join(name);
    fs::read_to_string(&path).with_context(|| format!("failed to read {}", path.display()))
}

/// Parse a host page from the fixtures directory.
pub fn load_page(name: &str) -> Result<Document> {
    init_logging();
    Ok(Document::parse(&read_fixture(name)?)?)
}

pub fn by_id(doc: &Document, id: &str) -> Result<NodeId> {
    doc.element_by_id(id)
        .with_context(|| format!("no element with id `{id}`"))
}

pub fn attr<'doc>(doc: &'doc Document, id: &str, name: &str) -> Result<Option<&'doc str>> {
    Ok(doc.attribute(by_id(doc, id)?, name))
}

/// Class list and `aria-hidden` of a node, for before/after comparisons.
pub fn visibility_snapshot(doc: &Document, node: NodeId) -> (Vec<String>, Option<String>) {
    (
        doc.classes(node).into_iter().map(str::to_owned).collect(),
        doc.attribute(node, "aria-hidden").map(str::to_owned),
    )
}
