//! Property renaming for inline script bodies.
//!
//! Scripts mix arbitrary JavaScript with accesses on framework objects, so only
//! property positions are touched: `obj.name` is renamed, a bare `name` never is.
//! Quoted keys (`obj['name']`) are outside the renaming namespace; they are only
//! rewritten to the double-quoted form. All other bytes are preserved.

use oxc_allocator::Allocator;
use oxc_ast::ast::{ComputedMemberExpression, Expression, Program, StaticMemberExpression};
use oxc_ast_visit::{walk, Visit};
use oxc_parser::Parser;
use oxc_span::SourceType;
use tracing::{trace, warn};

use crate::rename_map::RenameMap;

struct PropertyRenamer<'s, 'm> {
    source: &'s str,
    map: &'m RenameMap,
    replacements: Vec<(u32, u32, String)>,
}

impl<'s, 'm> PropertyRenamer<'s, 'm> {
    fn new(source: &'s str, map: &'m RenameMap) -> Self {
        PropertyRenamer {
            source,
            map,
            replacements: Vec::new(),
        }
    }

    /// Apply collected replacements to the source.
    fn finish(mut self) -> String {
        // Sort reverse to apply safely
        self.replacements.sort_by(|a, b| b.0.cmp(&a.0));

        let mut result = self.source.to_string();
        for (start, end, replacement) in self.replacements {
            result.replace_range((start as usize)..(end as usize), &replacement);
        }
        result
    }
}

impl<'a, 's, 'm> Visit<'a> for PropertyRenamer<'s, 'm> {
    fn visit_static_member_expression(&mut self, expr: &StaticMemberExpression<'a>) {
        let property = &expr.property;
        if let Some(renamed) = self.map.resolve(property.name.as_str()) {
            trace!(from = property.name.as_str(), to = %renamed, "renamed script property");
            self.replacements
                .push((property.span.start, property.span.end, renamed.into_owned()));
        }
        walk::walk_static_member_expression(self, expr);
    }

    fn visit_computed_member_expression(&mut self, expr: &ComputedMemberExpression<'a>) {
        if let Expression::StringLiteral(key) = &expr.expression {
            let raw = &self.source[key.span.start as usize..key.span.end as usize];
            if let Some(canonical) = double_quoted(raw) {
                self.replacements
                    .push((key.span.start, key.span.end, canonical));
            }
        }
        walk::walk_computed_member_expression(self, expr);
    }
}

/// Rewrite a single-quoted literal as a double-quoted one with the same value.
/// Returns `None` for literals that are not single-quoted.
fn double_quoted(raw: &str) -> Option<String> {
    let body = raw.strip_prefix('\'')?.strip_suffix('\'')?;
    let mut out = String::with_capacity(raw.len() + 2);
    out.push('"');

    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('\'') => out.push('\''),
                Some(escaped) => {
                    out.push('\\');
                    out.push(escaped);
                }
                None => out.push('\\'),
            },
            '"' => out.push_str("\\\""),
            c => out.push(c),
        }
    }

    out.push('"');
    Some(out)
}

/// Inline scripts are usually classic scripts; fall back to module goal for
/// `import`/`export` bodies.
fn parse_program<'a>(allocator: &'a Allocator, source: &'a str) -> Option<Program<'a>> {
    for module in [false, true] {
        let source_type = SourceType::default().with_module(module);
        let ret = Parser::new(allocator, source, source_type).parse();
        if ret.errors.is_empty() {
            return Some(ret.program);
        }
    }
    None
}

/// Rename the property accesses in a script body.
///
/// A body that does not parse as JavaScript is returned unchanged.
pub fn rename_properties(map: &RenameMap, source: &str) -> String {
    if source.trim().is_empty() {
        return source.to_string();
    }

    let allocator = Allocator::default();
    let Some(program) = parse_program(&allocator, source) else {
        warn!(
            len = source.len(),
            "inline script is not valid JavaScript; leaving it unchanged"
        );
        return source.to_string();
    };

    let mut renamer = PropertyRenamer::new(source, map);
    renamer.visit_program(&program);
    renamer.finish()
}
