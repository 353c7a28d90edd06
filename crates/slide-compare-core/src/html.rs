//! In-memory element tree.
//!
//! `HtmlTree` is an arena-backed `ElementBuilder` for hosts without a DOM:
//! static export, server-side previews and tests. It serializes to HTML with
//! the same escaping rules the markdown writers use.

use std::fmt;

use pulldown_cmark_escape::{FmtWriter, escape_html, escape_html_body_text};
use smol_str::SmolStr;

use crate::options::SlideCompareOptions;
use crate::parse::parse_block;
use crate::platform::{ElementBuilder, LinkResolver, PlatformError};
use crate::render::render;

/// Elements serialized without a closing tag.
const VOID_ELEMENTS: [&str; 4] = ["br", "hr", "img", "input"];

/// Index of an element in an `HtmlTree`.
#[derive(Clone, Debug, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Default)]
enum Content {
    #[default]
    Empty,
    Text(String),
    Markup(String),
}

#[derive(Debug, Clone)]
struct Node {
    tag: SmolStr,
    attrs: Vec<(SmolStr, String)>,
    style: Vec<(SmolStr, String)>,
    content: Content,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

#[derive(Debug, Clone, Default)]
pub struct HtmlTree {
    nodes: Vec<Node>,
}

impl HtmlTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// A tree holding a host section with an empty block mount point inside.
    ///
    /// Mirrors what a markdown host hands a code block processor: the mount
    /// point has a parent, so sibling content (the reset button) can be added.
    pub fn with_mount_point() -> (Self, NodeId) {
        let mut tree = Self::new();
        let section = tree.push_element("div", "markdown-preview-section");
        let mount = tree.push_element("div", "block-language-compare-images");
        tree.append_child(&section, &mount);
        (tree, mount)
    }

    fn push_element(&mut self, tag: &str, class: &str) -> NodeId {
        let mut attrs = Vec::new();
        if !class.is_empty() {
            attrs.push((SmolStr::new_static("class"), class.to_string()));
        }
        self.nodes.push(Node {
            tag: SmolStr::new(tag),
            attrs,
            style: Vec::new(),
            content: Content::Empty,
            children: Vec::new(),
            parent: None,
        });
        NodeId(self.nodes.len() - 1)
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id)?.parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or_default()
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        let node = self.node(id)?;
        node.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.attribute(id, "class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    pub fn style_property(&self, id: NodeId, name: &str) -> Option<&str> {
        let node = self.node(id)?;
        node.style
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Text content set with `set_text`, if any.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match &self.node(id)?.content {
            Content::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Every element carrying `class`, in creation order.
    pub fn find_by_class(&self, class: &str) -> Vec<NodeId> {
        (0..self.nodes.len())
            .map(NodeId)
            .filter(|id| self.has_class(*id, class))
            .collect()
    }

    /// Serialize `id` and its descendants.
    pub fn html(&self, id: NodeId) -> String {
        HtmlView { tree: self, id }.to_string()
    }

    /// Serialize every element without a parent, in creation order.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for (index, node) in self.nodes.iter().enumerate() {
            if node.parent.is_none() {
                out.push_str(&self.html(NodeId(index)));
            }
        }
        out
    }

    fn write_node(&self, f: &mut fmt::Formatter<'_>, id: NodeId) -> fmt::Result {
        let Some(node) = self.node(id) else {
            return Ok(());
        };
        write!(f, "<{}", node.tag)?;
        for (name, value) in &node.attrs {
            write!(f, " {}=\"", name)?;
            escape_html(FmtWriter(&mut *f), value)?;
            f.write_str("\"")?;
        }
        if !node.style.is_empty() {
            f.write_str(" style=\"")?;
            for (i, (name, value)) in node.style.iter().enumerate() {
                if i > 0 {
                    f.write_str(" ")?;
                }
                escape_html(FmtWriter(&mut *f), name)?;
                f.write_str(": ")?;
                escape_html(FmtWriter(&mut *f), value)?;
                f.write_str(";")?;
            }
            f.write_str("\"")?;
        }
        f.write_str(">")?;

        if VOID_ELEMENTS.contains(&node.tag.as_str()) {
            return Ok(());
        }

        match &node.content {
            Content::Empty => {}
            Content::Text(text) => escape_html_body_text(FmtWriter(&mut *f), text)?,
            Content::Markup(markup) => f.write_str(markup)?,
        }
        for child in &node.children {
            self.write_node(f, *child)?;
        }
        write!(f, "</{}>", node.tag)
    }

    fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.node(id).and_then(|n| n.parent) else {
            return;
        };
        if let Some(parent) = self.node_mut(parent) {
            parent.children.retain(|c| *c != id);
        }
        if let Some(node) = self.node_mut(id) {
            node.parent = None;
        }
    }
}

struct HtmlView<'a> {
    tree: &'a HtmlTree,
    id: NodeId,
}

impl fmt::Display for HtmlView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.tree.write_node(f, self.id)
    }
}

fn set_pair(pairs: &mut Vec<(SmolStr, String)>, name: &str, value: &str) {
    match pairs.iter_mut().find(|(k, _)| k == name) {
        Some((_, v)) => *v = value.to_string(),
        None => pairs.push((SmolStr::new(name), value.to_string())),
    }
}

impl ElementBuilder for HtmlTree {
    type Element = NodeId;

    fn create_element(&mut self, tag: &str, class: &str) -> Result<NodeId, PlatformError> {
        if tag.is_empty() || !tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(PlatformError(format!("invalid tag name {tag:?}")));
        }
        Ok(self.push_element(tag, class))
    }

    fn append_child(&mut self, parent: &NodeId, child: &NodeId) {
        if self.node(*parent).is_none() || self.node(*child).is_none() || parent == child {
            tracing::warn!(?parent, ?child, "append_child on unknown node");
            return;
        }
        self.detach(*child);
        if let Some(node) = self.node_mut(*child) {
            node.parent = Some(*parent);
        }
        if let Some(node) = self.node_mut(*parent) {
            node.children.push(*child);
        }
    }

    fn append_sibling(&mut self, anchor: &NodeId, element: &NodeId) -> bool {
        match self.parent(*anchor) {
            Some(parent) => {
                self.append_child(&parent, element);
                true
            }
            None => false,
        }
    }

    fn set_attribute(&mut self, element: &NodeId, name: &str, value: &str) {
        if let Some(node) = self.node_mut(*element) {
            set_pair(&mut node.attrs, name, value);
        }
    }

    fn set_text(&mut self, element: &NodeId, text: &str) {
        if let Some(node) = self.node_mut(*element) {
            node.content = Content::Text(text.to_string());
        }
    }

    fn set_inner_html(&mut self, element: &NodeId, html: &str) {
        if let Some(node) = self.node_mut(*element) {
            node.content = Content::Markup(html.to_string());
        }
    }

    fn set_style_property(&mut self, element: &NodeId, name: &str, value: &str) {
        if let Some(node) = self.node_mut(*element) {
            set_pair(&mut node.style, name, value);
        }
    }

    fn remove_style_property(&mut self, element: &NodeId, name: &str) {
        if let Some(node) = self.node_mut(*element) {
            node.style.retain(|(k, _)| k != name);
        }
    }

    fn set_tooltip(&mut self, element: &NodeId, label: &str) {
        self.set_attribute(element, "aria-label", label);
    }
}

/// Parse and render one block to an HTML string.
///
/// The output holds the block (comparison or error panel) followed by the
/// reset button when there is one. No event handlers are attached, so the
/// slider sits at its stylesheet default.
pub fn render_block_html<R>(
    source: &str,
    context_path: Option<&str>,
    resolver: &R,
    options: &SlideCompareOptions,
) -> String
where
    R: LinkResolver + ?Sized,
{
    let (mut tree, mount) = HtmlTree::with_mount_point();
    let result = parse_block(source, context_path, resolver, &options.image_formats);
    if let Err(err) = render(&mut tree, &mount, result, options) {
        tracing::warn!(%err, "failed to render comparison block");
    }
    match tree.parent(mount) {
        Some(section) => tree
            .children(section)
            .iter()
            .map(|child| tree.html(*child))
            .collect(),
        None => tree.html(mount),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestResolver;

    #[test]
    fn test_serialize_nested() {
        let mut tree = HtmlTree::new();
        let outer = tree.create_element("div", "outer").unwrap();
        let inner = tree.create_element("span", "").unwrap();
        tree.set_text(&inner, "a < b & c");
        tree.append_child(&outer, &inner);
        insta::assert_snapshot!(tree.html(outer), @r#"<div class="outer"><span>a &lt; b &amp; c</span></div>"#);
    }

    #[test]
    fn test_serialize_attributes_and_style() {
        let mut tree = HtmlTree::new();
        let img = tree.create_element("img", "pic").unwrap();
        tree.set_attribute(&img, "src", "a.png?x=1&y=2");
        tree.set_style_property(&img, "--sc-ratio", "25%");
        tree.set_style_property(&img, "--sc-ratio", "30%");
        insta::assert_snapshot!(tree.html(img), @r#"<img class="pic" src="a.png?x=1&amp;y=2" style="--sc-ratio: 30%;">"#);
    }

    #[test]
    fn test_remove_style() {
        let mut tree = HtmlTree::new();
        let div = tree.create_element("div", "").unwrap();
        tree.set_style_property(&div, "--sc-ratio", "25%");
        tree.remove_style_property(&div, "--sc-ratio");
        assert_eq!(tree.html(div), "<div></div>");
        assert_eq!(tree.style_property(div, "--sc-ratio"), None);
    }

    #[test]
    fn test_append_moves_child() {
        let mut tree = HtmlTree::new();
        let a = tree.create_element("div", "a").unwrap();
        let b = tree.create_element("div", "b").unwrap();
        let child = tree.create_element("p", "").unwrap();
        tree.append_child(&a, &child);
        tree.append_child(&b, &child);
        assert!(tree.children(a).is_empty());
        assert_eq!(tree.children(b), &[child]);
        assert_eq!(tree.parent(child), Some(b));
    }

    #[test]
    fn test_invalid_tag_rejected() {
        let mut tree = HtmlTree::new();
        assert!(tree.create_element("", "").is_err());
        assert!(tree.create_element("div onclick", "").is_err());
    }

    #[test]
    fn test_markup_not_escaped() {
        let mut tree = HtmlTree::new();
        let div = tree.create_element("div", "").unwrap();
        tree.set_inner_html(&div, "<b>bold</b>");
        assert_eq!(tree.html(div), "<div><b>bold</b></div>");
    }

    #[test]
    fn test_render_block_html_comparison() {
        let resolver = TestResolver::new(["a.png", "b.jpg"]);
        let html = render_block_html(
            "images: ![[a.png]] ![[b.jpg]]",
            Some("index.md"),
            &resolver,
            &SlideCompareOptions::default(),
        );
        assert!(html.starts_with(r#"<div class="block-language-compare-images"><div class="slide-compare">"#));
        assert!(html.contains(r#"<img class="sc-compared-image sc-left-image" src="app://vault/a.png" alt="a.png">"#));
        assert!(html.contains(r#"<img class="sc-compared-image sc-right-image" src="app://vault/b.jpg" alt="b.jpg">"#));
        assert!(html.contains(r#"<div class="sc-slider-container"><div class="sc-ratio-slider"></div></div>"#));
        assert!(html.contains(r#"<div class="sc-return-slider-button edit-block-button" aria-label="Return slider"><svg"#));
        assert_eq!(html.matches("slide-compare\"").count(), 1);
    }

    #[test]
    fn test_render_block_html_error() {
        let resolver = TestResolver::new(["a.png"]);
        let html = render_block_html(
            "images: ![[a.png]] ![[gone.png]]",
            Some("index.md"),
            &resolver,
            &SlideCompareOptions::default(),
        );
        insta::assert_snapshot!(html, @r#"
        <div class="block-language-compare-images"><div class="slide-compare"><pre class="sc-error-block">Slide Compare has encountered an error:
        - Invalid markdown embed file link.

        Please review this block and try again.</pre></div></div>
        "#);
    }
}
