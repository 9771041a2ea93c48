//! HTML document parsing and serialization.
//!
//! Tree construction, entity handling and serialization belong to html5ever;
//! this module only adapts its `RcDom` to what the renamer needs.

use html5ever::parse_document;
use html5ever::serialize::{serialize, SerializeOpts};
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom, SerializableHandle};
use std::rc::Rc;

use crate::error::RenameError;

/// Parse a full HTML document.
///
/// `<template>` contents are moved into the template element's children so
/// that traversal and serialization see them as ordinary descendants.
pub fn parse_html(html: &str) -> Result<RcDom, RenameError> {
    let dom = parse_document(RcDom::default(), Default::default())
        .from_utf8()
        .read_from(&mut html.as_bytes())
        .map_err(RenameError::Parse)?;

    hoist_template_contents(&dom.document);
    Ok(dom)
}

/// Serialize without pretty-printing.
pub fn serialize_html(dom: &RcDom) -> Result<String, RenameError> {
    let mut bytes = Vec::new();
    let document: SerializableHandle = dom.document.clone().into();
    serialize(&mut bytes, &document, SerializeOpts::default()).map_err(RenameError::Serialize)?;
    Ok(String::from_utf8(bytes)?)
}

fn hoist_template_contents(handle: &Handle) {
    if let NodeData::Element {
        template_contents, ..
    } = &handle.data
    {
        let fragment = template_contents.borrow_mut().take();
        if let Some(fragment) = fragment {
            let moved: Vec<Handle> = fragment.children.borrow_mut().drain(..).collect();
            let mut children = handle.children.borrow_mut();
            for child in moved {
                child.parent.set(Some(Rc::downgrade(handle)));
                children.push(child);
            }
        }
    }

    for child in handle.children.borrow().iter() {
        hoist_template_contents(child);
    }
}

/// Local tag name of an element node.
pub fn element_name(handle: &Handle) -> Option<String> {
    match &handle.data {
        NodeData::Element { name, .. } => Some(name.local.to_string()),
        _ => None,
    }
}

pub fn attribute_value(handle: &Handle, attr_name: &str) -> Option<String> {
    match &handle.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|attr| &*attr.name.local == attr_name)
            .map(|attr| attr.value.to_string()),
        _ => None,
    }
}

/// All elements named `tag` in the subtree rooted at `root` (inclusive), in
/// document order.
pub fn elements_by_tag(root: &Handle, tag: &str) -> Vec<Handle> {
    fn collect(handle: &Handle, tag: &str, found: &mut Vec<Handle>) {
        if let NodeData::Element { name, .. } = &handle.data {
            if &*name.local == tag {
                found.push(handle.clone());
            }
        }
        for child in handle.children.borrow().iter() {
            collect(child, tag, found);
        }
    }

    let mut found = Vec::new();
    collect(root, tag, &mut found);
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_serialize_wraps_document() {
        let dom = parse_html("<p>hi</p>").unwrap();
        assert_eq!(
            serialize_html(&dom).unwrap(),
            "<html><head></head><body><p>hi</p></body></html>"
        );
    }

    #[test]
    fn test_template_contents_are_children() {
        let dom = parse_html("<template><span>{{a}}</span></template>").unwrap();
        let templates = elements_by_tag(&dom.document, "template");
        assert_eq!(templates.len(), 1);
        assert_eq!(elements_by_tag(&templates[0], "span").len(), 1);

        let html = serialize_html(&dom).unwrap();
        assert!(html.contains("<template><span>{{a}}</span></template>"));
    }

    #[test]
    fn test_attribute_lookup() {
        let dom = parse_html(r#"<dom-module name="x-foo" id="m"></dom-module>"#).unwrap();
        let modules = elements_by_tag(&dom.document, "dom-module");
        assert_eq!(attribute_value(&modules[0], "name").as_deref(), Some("x-foo"));
        assert_eq!(attribute_value(&modules[0], "missing"), None);
        assert_eq!(element_name(&modules[0]).as_deref(), Some("dom-module"));
        assert_eq!(element_name(&dom.document), None);
    }

    #[test]
    fn test_elements_by_tag_document_order() {
        let dom = parse_html("<x-a id=1><x-a id=2></x-a></x-a><x-a id=3></x-a>").unwrap();
        let ids: Vec<_> = elements_by_tag(&dom.document, "x-a")
            .iter()
            .filter_map(|h| attribute_value(h, "id"))
            .collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }
}
