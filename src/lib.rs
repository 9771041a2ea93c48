//! # Databinding-aware HTML renaming
//!
//! Keeps an HTML document consistent with JavaScript whose property names were
//! renamed by a minifier. Given a [`RenameMap`] from original to renamed symbol,
//! [`rename`] rewrites:
//!
//! 1. **Binding annotations**: `{{expr}}` (and `[[expr]]` in the modern
//!    dialect) inside attribute values and text. Every identifier in a binding
//!    is a property path, so all of them are candidates.
//! 2. **Inline scripts**: only property positions (`obj.name`). Bare
//!    identifiers may be unrelated locals and are never touched.
//! 3. **Published-property lists**: `attributes="a b"` on legacy declarations.
//! 4. **Custom element attributes**: `long-name=` on usages of declared elements
//!    becomes the hyphenated form of the renamed property.
//!
//! Numeric path segments, `.*` wildcards and quoted keys are never renamed.
//! Matching is exact and case-sensitive, except that `fooChanged` follows `foo`.
//!
//! A malformed binding aborts the whole document; no partial output is produced.

#[cfg(feature = "napi")]
use napi_derive::napi;
use rayon::prelude::*;
use tracing::debug;

mod case;
mod document;
mod error;
mod expression;
mod lexer;
mod mode;
mod options;
mod rename_map;
mod renamer;
mod transform;
mod visitor;

#[cfg(test)]
mod rename_tests;

pub use case::{camel_to_hyphen, hyphen_to_camel};
pub use error::{ExpressionError, ExpressionErrorKind, RenameError};
pub use expression::rename_polymer_js_expression;
pub use lexer::{lex, render as render_tokens, Token};
pub use mode::BindingMode;
pub use options::RenameOptions;
pub use rename_map::RenameMap;
pub use renamer::rename_properties;

/// Rename `html` with the dialect detected from its declarations.
pub fn rename(map: &RenameMap, html: &str) -> Result<String, RenameError> {
    rename_with_options(map, html, &RenameOptions::default())
}

pub fn rename_with_options(
    map: &RenameMap,
    html: &str,
    options: &RenameOptions,
) -> Result<String, RenameError> {
    let dom = document::parse_html(html)?;

    // Nothing can change; skip traversal so unsupported binding syntax is not
    // rejected.
    if map.is_empty() {
        debug!("empty rename map; document left as parsed");
        return document::serialize_html(&dom);
    }

    let detection = mode::detect(&dom.document, options.dialect);
    transform::apply(map, &dom.document, &detection)?;
    document::serialize_html(&dom)
}

/// Rename independent documents in parallel, sharing one map.
///
/// Results are in input order; a failure in one document does not affect the others.
pub fn rename_all<S>(map: &RenameMap, documents: &[S]) -> Vec<Result<String, RenameError>>
where
    S: AsRef<str> + Sync,
{
    documents
        .par_iter()
        .map(|html| rename(map, html.as_ref()))
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════════════
// NAPI EXPORTS
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg(feature = "napi")]
fn parse_map_native(rename_map_json: &str) -> napi::Result<RenameMap> {
    RenameMap::from_json(rename_map_json).map_err(|e| napi::Error::from_reason(e.to_string()))
}

#[cfg(feature = "napi")]
#[napi]
pub fn rename_html_native(
    rename_map_json: String,
    html: String,
    options_json: Option<String>,
) -> napi::Result<String> {
    let map = parse_map_native(&rename_map_json)?;
    let options = match options_json {
        Some(json) => serde_json::from_str(&json)
            .map_err(|e| napi::Error::from_reason(format!("invalid options: {}", e)))?,
        None => RenameOptions::default(),
    };
    rename_with_options(&map, &html, &options).map_err(|e| napi::Error::from_reason(e.to_string()))
}

#[cfg(feature = "napi")]
#[napi]
pub fn rename_properties_native(rename_map_json: String, source: String) -> napi::Result<String> {
    let map = parse_map_native(&rename_map_json)?;
    Ok(rename_properties(&map, &source))
}

#[cfg(feature = "napi")]
#[napi]
pub fn rename_polymer_js_expression_native(
    rename_map_json: String,
    expression: String,
) -> napi::Result<String> {
    let map = parse_map_native(&rename_map_json)?;
    rename_polymer_js_expression(&map, &expression)
        .map_err(|e| napi::Error::from_reason(e.to_string()))
}
