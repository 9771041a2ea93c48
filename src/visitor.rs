use html5ever::{Attribute, QualName};
use markup5ever_rcdom::{Handle, NodeData};
use std::cell::RefCell;
use tendril::StrTendril;

/// Elements whose text content is raw data rather than markup text.
const RAW_TEXT_TAGS: &[&str] = &["script", "style"];

pub const SCRIPT_TAG: &str = "script";

/// A DOM node as seen by the renamer.
pub enum DomNode<'a> {
    Element {
        name: &'a QualName,
        attrs: &'a RefCell<Vec<Attribute>>,
    },
    Text(&'a RefCell<StrTendril>),
    /// Text content of a raw-text element (`<script>`, `<style>`).
    RawData(&'a RefCell<StrTendril>),
    /// Document, doctype, comment and processing-instruction nodes.
    Other,
}

impl<'a> DomNode<'a> {
    fn classify(handle: &'a Handle, ctx: WalkContext) -> Self {
        match &handle.data {
            NodeData::Element { name, attrs, .. } => DomNode::Element { name, attrs },
            NodeData::Text { contents } if ctx.in_raw_text => DomNode::RawData(contents),
            NodeData::Text { contents } => DomNode::Text(contents),
            _ => DomNode::Other,
        }
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            DomNode::Element { name, .. } => Some(&*name.local),
            _ => None,
        }
    }
}

/// Traversal state carried down the walk. Scripts never nest, so a flag is enough.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkContext {
    /// Inside a `<script>` element's content.
    pub in_script: bool,
    /// Direct child of a raw-text element.
    pub in_raw_text: bool,
}

/// Depth-first document traversal.
///
/// `enter` runs before a node's children, `leave` after them. Returning an
/// error aborts the walk.
pub trait DocumentVisitor {
    type Error;

    fn enter(&mut self, node: &DomNode<'_>, ctx: WalkContext) -> Result<(), Self::Error>;

    fn leave(&mut self, _node: &DomNode<'_>, _ctx: WalkContext) -> Result<(), Self::Error> {
        Ok(())
    }
}

pub fn walk<V: DocumentVisitor + ?Sized>(visitor: &mut V, root: &Handle) -> Result<(), V::Error> {
    walk_node(visitor, root, WalkContext::default())
}

fn walk_node<V: DocumentVisitor + ?Sized>(
    visitor: &mut V,
    handle: &Handle,
    ctx: WalkContext,
) -> Result<(), V::Error> {
    let node = DomNode::classify(handle, ctx);
    visitor.enter(&node, ctx)?;

    let tag = node.tag();
    let child_ctx = WalkContext {
        in_script: ctx.in_script || tag == Some(SCRIPT_TAG),
        in_raw_text: tag.is_some_and(|t| RAW_TEXT_TAGS.contains(&t)),
    };
    for child in handle.children.borrow().iter() {
        walk_node(visitor, child, child_ctx)?;
    }

    visitor.leave(&node, ctx)
}
