mod common;

use age_gate::{AgeGate, GateConfig, ROOT_ID};
use anyhow::Result;
use common::{attr, by_id, load_page, read_fixture};

#[test]
fn mounts_single_overlay_under_root() -> Result<()> {
    let mut doc = load_page("host_page.html")?;
    let config = GateConfig::from_json_str(&read_fixture("gate.json")?)?;
    let gate = AgeGate::mount(&mut doc, &config)?;

    let root = by_id(&doc, ROOT_ID)?;
    assert_eq!(gate.root(), root);
    assert_eq!(doc.parent(root), Some(doc.body()));
    for id in ["ag-modal-curtain", "ag-modal-dialog", "ag-modal-content"] {
        let matches = doc
            .elements()
            .into_iter()
            .filter(|node| doc.attribute(*node, "id") == Some(id))
            .count();
        assert_eq!(matches, 1, "{id} should exist exactly once");
    }
    let elements = gate.modal().elements();
    assert_eq!(doc.child_elements(root)?, vec![elements.curtain, elements.dialog]);
    Ok(())
}

#[test]
fn mount_applies_content_and_styles() -> Result<()> {
    let mut doc = load_page("host_page.html")?;
    let config = GateConfig::from_json_str(&read_fixture("gate.json")?)?;
    let gate = AgeGate::mount(&mut doc, &config)?;

    assert!(gate.modal().is_shown());
    assert!(doc.has_class(doc.body(), "locked_x9"));
    assert!(doc.has_class(gate.modal().elements().curtain, "curtain_x9"));
    assert_eq!(doc.text_content(by_id(&doc, "ag-title")?), "Are you over 18?");
    assert_eq!(doc.text_content(by_id(&doc, "ag-button")?), "Enter");
    assert_eq!(
        doc.text_content(by_id(&doc, "ag-checkbox-0-label")?),
        "I accept the terms"
    );
    assert_eq!(attr(&doc, "ag-button", "tabindex")?, Some("5"));
    assert_eq!(doc.active_element(), gate.modal().elements().content);
    Ok(())
}

#[test]
fn show_on_load_false_leaves_gate_hidden() -> Result<()> {
    let mut doc = load_page("host_page.html")?;
    let config = GateConfig::from_json_str(r#"{ "showOnLoad": false }"#)?;
    let mut gate = AgeGate::mount(&mut doc, &config)?;
    assert!(!gate.modal().is_shown());
    assert!(!doc.has_class(doc.body(), "s-ag-body-is-locked"));

    gate.modal_mut().show(&mut doc)?;
    assert!(doc.has_class(doc.body(), "s-ag-body-is-locked"));
    Ok(())
}
