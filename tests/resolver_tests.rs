use std::rc::Rc;

use selector_probe::{
    dom::{
        html::HtmlDocument,
        node::{DomNode, NodeKind},
        tree::DomTree,
    },
    error::ResolveError,
    xpath::resolver::{MAX_DEPTH, resolve},
};

// =========================================================================
// Fixed scenarios
// =========================================================================

#[test]
fn element_with_id_resolves_to_id_shortcut() {
    let (mut tree, body) = DomTree::with_root("BODY");
    let wrapper = tree.append_element(body, "SECTION");
    let div = tree.append_element(wrapper, "DIV");
    tree.set_attribute(div, "id", "foo");

    assert_eq!(resolve(&tree.node(div)).unwrap().as_str(), "id(\"foo\")");
}

#[test]
fn document_root_resolves_to_its_tag() {
    let (tree, body) = DomTree::with_root("BODY");
    assert_eq!(resolve(&tree.node(body)).unwrap().as_str(), "BODY");
}

#[test]
fn second_paragraph_with_empty_id_is_positional() {
    let doc = HtmlDocument::parse(r#"<body><p>x</p><p id="">target</p></body>"#).unwrap();
    let paragraphs = doc.select("p").unwrap();
    assert_eq!(paragraphs.len(), 2);

    assert_eq!(resolve(&paragraphs[1]).unwrap().as_str(), "BODY/P[2]");
    assert_eq!(resolve(&paragraphs[0]).unwrap().as_str(), "BODY/P[1]");
}

#[test]
fn root_with_id_uses_the_id_shortcut() {
    let doc = HtmlDocument::parse(r#"<body id="page"><p>x</p></body>"#).unwrap();
    assert_eq!(resolve(&doc.body()).unwrap().as_str(), "id(\"page\")");
    let p = doc.select("p").unwrap();
    assert_eq!(resolve(&p[0]).unwrap().as_str(), "id(\"page\")/P[1]");
}

// =========================================================================
// Properties
// =========================================================================

#[test]
fn identified_ancestor_anchors_the_path() {
    let doc = HtmlDocument::parse(
        r#"<body>
            <div><ul id="menu"><li>a</li><li>b</li><li><a href="/c">c</a></li></ul></div>
        </body>"#,
    )
    .unwrap();
    let link = &doc.select("a").unwrap()[0];

    assert_eq!(resolve(link).unwrap().as_str(), "id(\"menu\")/LI[3]/A[1]");
}

#[test]
fn index_counts_only_same_tag_element_siblings() {
    let (mut tree, body) = DomTree::with_root("BODY");
    tree.append_element(body, "P");
    tree.append_element(body, "DIV");
    tree.append_element(body, "P");
    tree.append_element(body, "SPAN");
    let third_p = tree.append_element(body, "P");

    assert_eq!(resolve(&tree.node(third_p)).unwrap().as_str(), "BODY/P[3]");
}

#[test]
fn nth_sibling_gets_index_n() {
    let (mut tree, body) = DomTree::with_root("BODY");
    let list = tree.append_element(body, "UL");
    let items: Vec<_> = (0..5).map(|_| tree.append_element(list, "LI")).collect();

    for (i, item) in items.iter().enumerate() {
        let path = resolve(&tree.node(*item)).unwrap();
        assert_eq!(path.as_str(), format!("BODY/UL[1]/LI[{}]", i + 1));
    }
}

#[test]
fn text_and_comment_siblings_do_not_change_the_path() {
    let (mut plain, body) = DomTree::with_root("BODY");
    plain.append_element(body, "P");
    let target = plain.append_element(body, "P");
    let expected = resolve(&plain.node(target)).unwrap();

    let (mut noisy, body) = DomTree::with_root("BODY");
    noisy.append_text(body, "\n  ");
    noisy.append_element(body, "P");
    noisy.append_comment(body, " spacer ");
    noisy.append_text(body, "text");
    let target = noisy.append_element(body, "P");
    noisy.append_text(body, "after");

    assert_eq!(resolve(&noisy.node(target)).unwrap(), expected);
    assert_eq!(expected.as_str(), "BODY/P[2]");
}

#[test]
fn resolving_twice_gives_the_same_path() {
    let doc = HtmlDocument::parse(
        "<body><table><tr><td>1</td><td>2</td></tr><tr><td>3</td></tr></table></body>",
    )
    .unwrap();
    let cells = doc.select("td").unwrap();
    let first = resolve(&cells[2]).unwrap();
    let second = resolve(&cells[2]).unwrap();

    assert_eq!(first, second);
    // html5ever inserts the implied TBODY
    assert_eq!(first.as_str(), "BODY/TABLE[1]/TBODY[1]/TR[2]/TD[1]");
}

// =========================================================================
// Tree consistency failures
// =========================================================================

#[test]
fn element_outside_body_is_detached() {
    let doc = HtmlDocument::parse("<html><head><title>t</title></head><body></body></html>").unwrap();
    let title = &doc.select("title").unwrap()[0];

    // The walk climbs past <html> to the parentless document node
    assert!(matches!(resolve(title), Err(ResolveError::DetachedNode { .. })));
}

#[test]
fn parentless_non_root_node_is_detached() {
    let (mut tree, _body) = DomTree::with_root("BODY");
    let orphan = tree.create_element("DIV");
    let child = tree.append_element(orphan, "SPAN");

    assert_eq!(
        resolve(&tree.node(child)),
        Err(ResolveError::DetachedNode { tag: "DIV".into() })
    );
}

/// Host tree whose parent/child links can disagree.
#[derive(Clone)]
struct FakeNode {
    index: usize,
    nodes: Rc<Vec<FakeData>>,
}

struct FakeData {
    tag: &'static str,
    parent: Option<usize>,
    children: Vec<usize>,
    root: bool,
}

impl PartialEq for FakeNode {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.nodes, &other.nodes) && self.index == other.index
    }
}

impl FakeNode {
    fn at(&self, index: usize) -> Self {
        FakeNode {
            index,
            nodes: Rc::clone(&self.nodes),
        }
    }
}

impl DomNode for FakeNode {
    fn kind(&self) -> NodeKind {
        NodeKind::Element
    }

    fn tag_name(&self) -> &str {
        self.nodes[self.index].tag
    }

    fn identifier(&self) -> &str {
        ""
    }

    fn parent(&self) -> Option<Self> {
        self.nodes[self.index].parent.map(|i| self.at(i))
    }

    fn children(&self) -> Vec<Self> {
        self.nodes[self.index].children.iter().map(|&i| self.at(i)).collect()
    }

    fn is_document_root(&self) -> bool {
        self.nodes[self.index].root
    }
}

fn fake(nodes: Vec<FakeData>, index: usize) -> FakeNode {
    FakeNode {
        index,
        nodes: Rc::new(nodes),
    }
}

#[test]
fn node_missing_from_parents_children_is_an_error() {
    let node = fake(
        vec![
            FakeData { tag: "BODY", parent: None, children: vec![], root: true },
            FakeData { tag: "DIV", parent: Some(0), children: vec![], root: false },
        ],
        1,
    );

    assert_eq!(
        resolve(&node),
        Err(ResolveError::NotAChildOfParent {
            tag: "DIV".into(),
            parent: "BODY".into(),
        })
    );
}

#[test]
fn cyclic_ancestry_stops_at_the_depth_limit() {
    let node = fake(
        vec![
            FakeData { tag: "DIV", parent: Some(1), children: vec![1], root: false },
            FakeData { tag: "DIV", parent: Some(0), children: vec![0], root: false },
        ],
        0,
    );

    assert_eq!(
        resolve(&node),
        Err(ResolveError::DepthExceeded { limit: MAX_DEPTH })
    );
}

#[test]
fn failure_on_one_node_does_not_affect_the_next() {
    let (mut tree, body) = DomTree::with_root("BODY");
    let orphan = tree.create_element("DIV");
    let fine = tree.append_element(body, "DIV");

    assert!(resolve(&tree.node(orphan)).is_err());
    assert_eq!(resolve(&tree.node(fine)).unwrap().as_str(), "BODY/DIV[1]");
}
