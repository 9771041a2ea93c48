//! Document traversal and mutation.
//!
//! Databinding annotations in attribute values and text, published-property
//! lists on declarations, and inline scripts are rewritten inside each
//! declaration subtree. Custom element usages anywhere in the document then
//! get their attribute names remapped.

use html5ever::{Attribute, LocalName};
use markup5ever_rcdom::{Handle, NodeData};
use std::cell::RefCell;
use tendril::StrTendril;
use tracing::{debug, trace};

use crate::case::{camel_to_hyphen, hyphen_to_camel};
use crate::document::elements_by_tag;
use crate::error::RenameError;
use crate::expression::{is_identifier_part, render_expression};
use crate::lexer::{lex, render};
use crate::mode::{BindingMode, Detection, PUBLISHED_PROPERTIES_ATTR};
use crate::rename_map::RenameMap;
use crate::renamer::rename_properties;
use crate::visitor::{walk, DocumentVisitor, DomNode, WalkContext, SCRIPT_TAG};

/// Counters reported once a document has been rewritten.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenameStats {
    pub attributes: usize,
    pub text_nodes: usize,
    pub scripts: usize,
    pub declarations: usize,
    pub custom_attributes: usize,
}

/// Rename the symbols inside every binding of `input`.
///
/// A binding is an open delimiter, the text up to the next delimiter of the
/// dialect, and the matching close delimiter. In the legacy dialect `[[`/`]]`
/// are plain text, so `{{ a[[0]] }}` is one binding. Anything else, including
/// unterminated, mismatched or empty delimiters, is kept as literal text.
/// Returns `None` when no symbol was renamed.
pub fn rename_bindings(
    map: &RenameMap,
    mode: BindingMode,
    input: &str,
) -> Result<Option<String>, RenameError> {
    let tokens = lex(input);
    let mut out = String::with_capacity(input.len());
    let mut renamed = 0;
    let mut i = 0;

    while i < tokens.len() {
        let token = tokens[i];
        if let Some(close) = mode.closing_delimiter(token) {
            let end = tokens[i + 1..]
                .iter()
                .position(|next| mode.is_delimiter(*next))
                .map(|n| i + 1 + n);
            if let Some(end) = end.filter(|&end| end > i + 1 && tokens[end] == close) {
                let expression = render(&tokens[i + 1..end]);
                let rendered = render_expression(map, &expression)?;
                out.push_str(token.as_str());
                if rendered.renamed > 0 {
                    renamed += rendered.renamed;
                    out.push_str(&rendered.text);
                } else {
                    out.push_str(&expression);
                }
                out.push_str(close.as_str());
                i = end + 1;
                continue;
            }
        }
        out.push_str(token.as_str());
        i += 1;
    }

    Ok((renamed > 0).then_some(out))
}

/// Rename the symbols of a published-property list. Separators between them
/// (spaces, newlines, commas) are copied as written.
fn rename_property_list(map: &RenameMap, list: &str) -> Option<String> {
    let mut out = String::with_capacity(list.len());
    let mut renamed = 0;
    let mut rest = list;

    while let Some(first) = rest.chars().next() {
        let is_symbol = is_identifier_part(first);
        let len = rest
            .find(|c: char| is_identifier_part(c) != is_symbol)
            .unwrap_or(rest.len());
        let (run, tail) = rest.split_at(len);
        match map.resolve(run) {
            Some(target) if is_symbol => {
                out.push_str(&target);
                renamed += 1;
            }
            _ => out.push_str(run),
        }
        rest = tail;
    }

    (renamed > 0).then_some(out)
}

/// Visitor applying databinding renames to one declaration subtree.
pub struct DatabindingRenamer<'m> {
    map: &'m RenameMap,
    mode: BindingMode,
    pub stats: RenameStats,
}

impl<'m> DatabindingRenamer<'m> {
    pub fn new(map: &'m RenameMap, mode: BindingMode) -> Self {
        DatabindingRenamer {
            map,
            mode,
            stats: RenameStats::default(),
        }
    }

    fn rename_published_properties(
        &mut self,
        attrs: &RefCell<Vec<Attribute>>,
    ) -> Result<(), RenameError> {
        let mut attrs = attrs.borrow_mut();
        let Some(attr) = attrs
            .iter_mut()
            .find(|attr| &*attr.name.local == PUBLISHED_PROPERTIES_ATTR)
        else {
            return Ok(());
        };

        if let Some(renamed) = rename_property_list(self.map, &attr.value) {
            trace!(from = %attr.value, to = %renamed, "renamed published properties");
            attr.value = StrTendril::from(renamed);
            self.stats.declarations += 1;
        }
        Ok(())
    }

    fn rename_attribute_values(
        &mut self,
        attrs: &RefCell<Vec<Attribute>>,
    ) -> Result<(), RenameError> {
        for attr in attrs.borrow_mut().iter_mut() {
            if let Some(renamed) = rename_bindings(self.map, self.mode, &attr.value)? {
                attr.value = StrTendril::from(renamed);
                self.stats.attributes += 1;
            }
        }
        Ok(())
    }
}

impl DocumentVisitor for DatabindingRenamer<'_> {
    type Error = RenameError;

    fn enter(&mut self, node: &DomNode<'_>, ctx: WalkContext) -> Result<(), RenameError> {
        match node {
            DomNode::Element { name, attrs } => {
                let tag = &*name.local;
                if tag == self.mode.declaration_tag() {
                    self.rename_published_properties(attrs)
                } else if tag == SCRIPT_TAG {
                    Ok(())
                } else {
                    self.rename_attribute_values(attrs)
                }
            }
            DomNode::Text(contents) => {
                let renamed = rename_bindings(self.map, self.mode, &contents.borrow())?;
                if let Some(renamed) = renamed {
                    *contents.borrow_mut() = StrTendril::from(renamed);
                    self.stats.text_nodes += 1;
                }
                Ok(())
            }
            DomNode::RawData(contents) if ctx.in_script => {
                let source = contents.borrow().to_string();
                let renamed = rename_properties(self.map, &source);
                if renamed != source {
                    *contents.borrow_mut() = StrTendril::from(renamed);
                    self.stats.scripts += 1;
                }
                Ok(())
            }
            DomNode::RawData(_) | DomNode::Other => Ok(()),
        }
    }
}

/// Remap attribute names on usages of the declared custom elements.
///
/// `long-name="x"` on `<x-foo>` becomes `rb="x"` when `longName` maps to `rb`.
/// Values are left alone.
pub fn rename_custom_element_attributes(
    map: &RenameMap,
    document: &Handle,
    custom_tags: &[String],
) -> usize {
    let mut renamed = 0;
    for tag in custom_tags {
        for element in elements_by_tag(document, tag) {
            let NodeData::Element { attrs, .. } = &element.data else {
                continue;
            };
            for attr in attrs.borrow_mut().iter_mut() {
                let property = hyphen_to_camel(&attr.name.local);
                if let Some(target) = map.get(&property) {
                    let attr_name = camel_to_hyphen(target);
                    trace!(
                        element = %tag,
                        from = %attr.name.local,
                        to = %attr_name,
                        "renamed custom element attribute"
                    );
                    attr.name.local = LocalName::from(attr_name);
                    renamed += 1;
                }
            }
        }
    }
    renamed
}

/// Rewrite a parsed document in place.
pub fn apply(
    map: &RenameMap,
    document: &Handle,
    detection: &Detection,
) -> Result<RenameStats, RenameError> {
    let mut renamer = DatabindingRenamer::new(map, detection.mode);
    for declaration in &detection.declarations {
        walk(&mut renamer, declaration)?;
    }

    let mut stats = renamer.stats;
    stats.custom_attributes =
        rename_custom_element_attributes(map, document, &detection.custom_tags);

    debug!(
        attributes = stats.attributes,
        text_nodes = stats.text_nodes,
        scripts = stats.scripts,
        declarations = stats.declarations,
        custom_attributes = stats.custom_attributes,
        "renamed document"
    );
    Ok(stats)
}
