use selector_probe::{
    dom::{html::HtmlDocument, node::DomNode},
    error::LocateError,
    xpath::{locator::LocatorPath, navigate::locate, resolver::resolve},
};

const PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Shop</title></head>
<body>
  <header id="top">
    <nav><a href="/">Home</a> | <a href="/cart">Cart</a></nav>
  </header>
  <!-- product grid -->
  <main>
    <div class="card"><img src="a.png" alt="Apple"><button>Buy</button></div>
    <div class="card"><img src="b.png" alt="Banana"><button>Buy</button></div>
    <div class="card" id="">
      <p>Cherry</p>
      <form><input type="text" name="q" value="red"><input type="submit" value="Go"></form>
    </div>
  </main>
  <footer><p>one</p>text<p>two</p></footer>
</body>
</html>"#;

#[test]
fn every_body_element_round_trips() {
    let doc = HtmlDocument::parse(PAGE).unwrap();
    let root = doc.body();
    let elements = doc.select("body, body *").unwrap();
    assert!(elements.len() > 15);

    for element in elements {
        let path = resolve(&element).unwrap();
        let found = locate(&root, &path).unwrap();
        assert_eq!(found, element, "path {} led elsewhere", path);
    }
}

#[test]
fn locate_follows_id_anchor_then_steps() {
    let doc = HtmlDocument::parse(PAGE).unwrap();
    let cart = locate(&doc.body(), &LocatorPath::new("id(\"top\")/NAV[1]/A[2]")).unwrap();

    assert_eq!(cart.tag_name(), "A");
    assert_eq!(cart.attribute("href"), Some("/cart"));
}

#[test]
fn locate_skips_text_between_same_tag_siblings() {
    let doc = HtmlDocument::parse(PAGE).unwrap();
    let second = locate(&doc.body(), &LocatorPath::new("BODY/FOOTER[1]/P[2]")).unwrap();
    assert_eq!(second.children()[0].text(), "two");
}

#[test]
fn unknown_id_is_reported() {
    let doc = HtmlDocument::parse(PAGE).unwrap();
    assert_eq!(
        locate(&doc.body(), &LocatorPath::new("id(\"missing\")")),
        Err(LocateError::UnknownId("missing".into()))
    );
}

#[test]
fn wrong_root_tag_is_reported() {
    let doc = HtmlDocument::parse(PAGE).unwrap();
    assert_eq!(
        locate(&doc.body(), &LocatorPath::new("HTML/BODY[1]")),
        Err(LocateError::RootMismatch {
            expected: "HTML".into(),
            actual: "BODY".into(),
        })
    );
}

#[test]
fn out_of_range_position_names_the_failing_step() {
    let doc = HtmlDocument::parse(PAGE).unwrap();
    assert_eq!(
        locate(&doc.body(), &LocatorPath::new("BODY/MAIN[1]/DIV[4]")),
        Err(LocateError::NoMatch {
            step: 2,
            segment: "DIV[4]".into(),
        })
    );
}

#[test]
fn malformed_locator_is_rejected() {
    let doc = HtmlDocument::parse(PAGE).unwrap();
    assert!(matches!(
        locate(&doc.body(), &LocatorPath::new("BODY//P[1]")),
        Err(LocateError::Malformed { .. })
    ));
}
