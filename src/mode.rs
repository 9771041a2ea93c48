//! Binding dialect detection.

use markup5ever_rcdom::Handle;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::document::{attribute_value, element_name, elements_by_tag};
use crate::lexer::Token;

/// Declaration element of the legacy dialect; carries `attributes="a b c"`.
pub const LEGACY_DECLARATION_TAG: &str = "polymer-element";
/// Declaration element of the modern dialect; carries the custom tag in `name`.
pub const MODERN_DECLARATION_TAG: &str = "dom-module";
/// Published-property list attribute of a legacy declaration.
pub const PUBLISHED_PROPERTIES_ATTR: &str = "attributes";
pub const DECLARATION_NAME_ATTR: &str = "name";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BindingMode {
    /// `{{ }}` only; `[[ ]]` is plain text.
    Legacy,
    /// `{{ }}` two-way and `[[ ]]` one-way bindings.
    Modern,
}

impl BindingMode {
    pub fn declaration_tag(self) -> &'static str {
        match self {
            BindingMode::Legacy => LEGACY_DECLARATION_TAG,
            BindingMode::Modern => MODERN_DECLARATION_TAG,
        }
    }

    /// Whether `token` delimits bindings in this dialect. Legacy documents
    /// treat `[[`/`]]` as plain text.
    pub fn is_delimiter(self, token: Token<'_>) -> bool {
        match token {
            Token::Literal(_) => false,
            Token::MustacheOpen | Token::MustacheClose => true,
            Token::BracketOpen | Token::BracketClose => self == BindingMode::Modern,
        }
    }

    /// The close delimiter that ends a binding opened by `token`, if `token`
    /// opens a binding in this dialect.
    pub fn closing_delimiter(self, token: Token<'_>) -> Option<Token<'static>> {
        match (self, token) {
            (_, Token::MustacheOpen) => Some(Token::MustacheClose),
            (BindingMode::Modern, Token::BracketOpen) => Some(Token::BracketClose),
            _ => None,
        }
    }
}

/// Outcome of inspecting a document for component declarations.
#[derive(Debug, Clone)]
pub struct Detection {
    pub mode: BindingMode,
    /// Outermost declaration elements, in document order.
    pub declarations: Vec<Handle>,
    /// Custom tag names declared by the document (modern dialect only).
    pub custom_tags: Vec<String>,
}

/// Decide the dialect of `document`, or use `forced` when given.
pub fn detect(document: &Handle, forced: Option<BindingMode>) -> Detection {
    let (mode, declarations) = match forced {
        Some(mode) => (mode, elements_by_tag(document, mode.declaration_tag())),
        None => {
            let modern = elements_by_tag(document, MODERN_DECLARATION_TAG);
            if modern.is_empty() {
                (
                    BindingMode::Legacy,
                    elements_by_tag(document, LEGACY_DECLARATION_TAG),
                )
            } else {
                (BindingMode::Modern, modern)
            }
        }
    };

    let mut custom_tags = Vec::new();
    if mode == BindingMode::Modern {
        for declaration in &declarations {
            if let Some(name) = attribute_value(declaration, DECLARATION_NAME_ATTR) {
                if !name.is_empty() && !custom_tags.contains(&name) {
                    custom_tags.push(name);
                }
            }
        }
    }

    let declarations = outermost(declarations);
    debug!(
        ?mode,
        declarations = declarations.len(),
        custom_tags = custom_tags.len(),
        "detected binding dialect"
    );

    Detection {
        mode,
        declarations,
        custom_tags,
    }
}

/// Drop declarations nested inside another one; their subtree is already
/// visited through the ancestor.
fn outermost(declarations: Vec<Handle>) -> Vec<Handle> {
    let tag = match declarations.first().and_then(element_name) {
        Some(tag) => tag,
        None => return declarations,
    };
    declarations
        .into_iter()
        .filter(|handle| !has_ancestor_tag(handle, &tag))
        .collect()
}

fn has_ancestor_tag(handle: &Handle, tag: &str) -> bool {
    let mut current = parent_of(handle);
    while let Some(node) = current {
        if element_name(&node).as_deref() == Some(tag) {
            return true;
        }
        current = parent_of(&node);
    }
    false
}

fn parent_of(handle: &Handle) -> Option<Handle> {
    let weak = handle.parent.take();
    let parent = weak.as_ref().and_then(|w| w.upgrade());
    handle.parent.set(weak);
    parent
}
