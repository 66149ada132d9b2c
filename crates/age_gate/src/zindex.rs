//! Highest explicit z-index on the page.

use dom::Document;
use log::trace;

/// Scan every connected element and return the highest computed `z-index`,
/// counting both `<style>` sheet rules and inline declarations.
///
/// `auto`, empty and non-integer values count as 0, so the result is never
/// negative. Nothing is cached: the page may have changed since the last
/// call, and detached elements are never visited.
pub fn resolve(document: &Document) -> i32 {
    let cascade = document.cascade();
    document
        .elements()
        .into_iter()
        .filter_map(|node| cascade.computed_style(document, node, "z-index").ok())
        .map(|value| parse_z_index(&value))
        .fold(0, i32::max)
}

fn parse_z_index(value: &str) -> i32 {
    value.trim().parse::<i32>().unwrap_or_else(|_| {
        trace!(target: "age_gate", "treating z-index `{value}` as 0");
        0
    })
}
