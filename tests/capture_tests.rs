use selector_probe::{
    browser::{capture::CapturedClick, session::parse_clicks},
    click::label::element_label,
    dom::node::{DomNode, LabelSource},
    error::CaptureError,
    xpath::resolver::resolve,
};
use serde_json::json;

/// `<body>text<div>..</div><!--c--><div><ul><li/><li><a>target</a></li></ul></div></body>`
fn nested_link_click() -> serde_json::Value {
    json!({
        "url": "https://example.com/shop",
        "target": {
            "tag": "A",
            "id": "",
            "className": "buy primary",
            "value": "",
            "text": "  Add to cart ",
            "alt": ""
        },
        "ancestry": [
            {
                "tag": "A", "id": "", "isRoot": false,
                "siblings": [ { "nodeType": 3, "tag": "" }, { "nodeType": 1, "tag": "A" } ],
                "position": 1
            },
            {
                "tag": "LI", "id": "", "isRoot": false,
                "siblings": [ { "nodeType": 1, "tag": "LI" }, { "nodeType": 1, "tag": "LI" } ],
                "position": 1
            },
            {
                "tag": "UL", "id": "", "isRoot": false,
                "siblings": [ { "nodeType": 1, "tag": "UL" } ],
                "position": 0
            },
            {
                "tag": "DIV", "id": "", "isRoot": false,
                "siblings": [
                    { "nodeType": 3, "tag": "" },
                    { "nodeType": 1, "tag": "DIV" },
                    { "nodeType": 8, "tag": "" },
                    { "nodeType": 1, "tag": "DIV" }
                ],
                "position": 3
            },
            { "tag": "BODY", "id": "", "isRoot": true, "siblings": [], "position": null }
        ]
    })
}

#[test]
fn captured_click_resolves_like_the_page() {
    let click: CapturedClick = serde_json::from_value(nested_link_click()).unwrap();
    let (tree, target) = click.to_tree().unwrap();
    let node = tree.node(target);

    assert_eq!(
        resolve(&node).unwrap().as_str(),
        "BODY/DIV[2]/UL[1]/LI[2]/A[1]"
    );
    assert_eq!(element_label(&node), "Add to cart");
    assert_eq!(node.class_name(), "buy primary");
}

#[test]
fn captured_ancestor_id_anchors_the_path() {
    let mut raw = nested_link_click();
    raw["ancestry"][2]["id"] = json!("cart-items");
    let click: CapturedClick = serde_json::from_value(raw).unwrap();
    let (tree, target) = click.to_tree().unwrap();

    assert_eq!(
        resolve(&tree.node(target)).unwrap().as_str(),
        "id(\"cart-items\")/LI[2]/A[1]"
    );
}

#[test]
fn click_on_body_itself() {
    let click: CapturedClick = serde_json::from_value(json!({
        "target": { "tag": "BODY" },
        "ancestry": [ { "tag": "BODY", "isRoot": true } ]
    }))
    .unwrap();
    let (tree, target) = click.to_tree().unwrap();

    assert!(tree.node(target).is_document_root());
    assert_eq!(resolve(&tree.node(target)).unwrap().as_str(), "BODY");
}

#[test]
fn chain_that_never_reaches_body_is_detached() {
    // A click inside an element that was removed from the document
    let click: CapturedClick = serde_json::from_value(json!({
        "target": { "tag": "SPAN" },
        "ancestry": [
            { "tag": "SPAN", "siblings": [ { "nodeType": 1, "tag": "SPAN" } ], "position": 0 },
            { "tag": "DIV" }
        ]
    }))
    .unwrap();
    let (tree, target) = click.to_tree().unwrap();

    assert!(resolve(&tree.node(target)).is_err());
}

#[test]
fn position_pointing_at_other_tag_is_rejected() {
    let mut raw = nested_link_click();
    raw["ancestry"][1]["position"] = json!(5);
    let click: CapturedClick = serde_json::from_value(raw).unwrap();

    assert!(matches!(
        click.to_tree(),
        Err(CaptureError::Inconsistent { level: 1, .. })
    ));

    let mut raw = nested_link_click();
    raw["ancestry"][3]["position"] = json!(0);
    let click: CapturedClick = serde_json::from_value(raw).unwrap();

    assert!(matches!(
        click.to_tree(),
        Err(CaptureError::Inconsistent { level: 3, .. })
    ));
}

#[test]
fn empty_ancestry_is_rejected() {
    let click: CapturedClick = serde_json::from_value(json!({
        "target": { "tag": "A" },
        "ancestry": []
    }))
    .unwrap();

    assert_eq!(click.to_tree().unwrap_err(), CaptureError::EmptyChain);
}

#[test]
fn drained_queue_skips_malformed_entries() {
    let data = json!([
        nested_link_click(),
        { "target": "not an object" },
        nested_link_click()
    ]);

    let clicks = parse_clicks(data);
    assert_eq!(clicks.len(), 2);
    assert_eq!(clicks[0].url, "https://example.com/shop");
}

#[test]
fn null_queue_is_empty() {
    assert!(parse_clicks(serde_json::Value::Null).is_empty());
}
