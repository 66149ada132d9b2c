mod common;

use age_gate::{AgeGate, GateConfig, zindex};
use anyhow::Result;
use common::{by_id, load_page};

#[test]
fn sheet_declared_z_index_sets_the_baseline() -> Result<()> {
    let doc = load_page("sheet_page.html")?;
    assert_eq!(doc.computed_style(by_id(&doc, "chat")?, "position")?, "fixed");
    assert_eq!(zindex::resolve(&doc), 9000);
    Ok(())
}

#[test]
fn overlay_stacks_above_sheet_positioned_widget() -> Result<()> {
    let mut doc = load_page("sheet_page.html")?;
    let gate = AgeGate::mount(&mut doc, &GateConfig::default())?;
    let elements = gate.modal().elements();
    for (node, expected) in [
        (elements.curtain, "9001"),
        (elements.dialog, "9002"),
        (elements.content, "9003"),
    ] {
        assert_eq!(doc.style_property(node, "z-index").as_deref(), Some(expected));
        assert_eq!(doc.computed_style(node, "z-index")?, expected);
    }
    Ok(())
}
