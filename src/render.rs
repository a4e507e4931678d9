//! Document renderer
//!
//! Rewrites placeholders paragraph by paragraph across header, body (tables
//! included) and footer. Per paragraph:
//!
//! 1. concatenate the run text, so placeholders split across runs match
//! 2. scan for tokens and resolve them in namespace order
//! 3. splice resolved, non-empty values into the text; everything else,
//!    unresolved placeholders included, is copied through byte for byte
//! 4. if anything changed, replace the runs with one run carrying the new
//!    text and the first run's format
//!
//! Paragraphs without a successful replacement keep their runs untouched.
//! Replacement values are never rescanned.

use std::collections::{BTreeSet, HashMap};

use docgen_types::{Document, Paragraph, Run};
use tracing::debug;

use crate::context::DataContext;
use crate::grammar::{self, PlaceholderToken, TokenMatch};
use crate::resolver::Resolver;

/// Result of one render pass
#[derive(Debug, Clone)]
pub struct RenderOutcome {
    pub document: Document,
    /// Placeholders left in the output, as they appear in the text
    pub unresolved: BTreeSet<String>,
    /// Number of placeholder occurrences replaced
    pub replacements: usize,
}

/// Renders templates against a data context
pub struct DocumentRenderer;

impl DocumentRenderer {
    /// Render a fresh copy of `template`; the template itself is untouched
    pub fn render(template: &Document, ctx: &DataContext<'_>) -> RenderOutcome {
        let mut document = template.clone();
        let mut unresolved = BTreeSet::new();
        let mut replacements = 0;

        document.for_each_paragraph_mut(|region, paragraph| {
            let stats = Self::render_paragraph(paragraph, ctx);
            if !stats.unresolved.is_empty() {
                debug!(?region, unresolved = ?stats.unresolved, "Placeholders left literal");
            }
            replacements += stats.replacements;
            unresolved.extend(stats.unresolved);
        });

        debug!(
            replacements,
            unresolved = unresolved.len(),
            firm = ctx.firm().map(|f| f.name),
            "Render pass complete"
        );

        RenderOutcome {
            document,
            unresolved,
            replacements,
        }
    }

    /// Rewrite one paragraph in place
    fn render_paragraph(paragraph: &mut Paragraph, ctx: &DataContext<'_>) -> ParagraphStats {
        let text = paragraph.text();
        let matches = grammar::scan(&text);
        if matches.is_empty() {
            return ParagraphStats::default();
        }

        let tokens = distinct_tokens(&matches);
        let mut values: HashMap<PlaceholderToken, String> = HashMap::new();
        for resolution in Resolver::resolve_in_order(&tokens, ctx) {
            if let Some(value) = resolution.value.filter(|v| !v.is_empty()) {
                values.entry(resolution.token).or_insert(value);
            }
        }

        let mut stats = ParagraphStats::default();
        let mut rewritten = String::with_capacity(text.len());
        let mut last_end = 0;
        for m in &matches {
            rewritten.push_str(&text[last_end..m.span.start]);
            match values.get(&m.token) {
                Some(value) => {
                    rewritten.push_str(value);
                    stats.replacements += 1;
                }
                None => {
                    rewritten.push_str(&text[m.span.clone()]);
                    stats.unresolved.insert(m.token.literal());
                }
            }
            last_end = m.span.end;
        }
        rewritten.push_str(&text[last_end..]);

        if stats.replacements > 0 {
            let format = paragraph
                .runs
                .first()
                .map(|r| r.format.clone())
                .unwrap_or_default();
            paragraph.runs = vec![Run::with_format(rewritten, format)];
        }
        stats
    }
}

#[derive(Debug, Default)]
struct ParagraphStats {
    replacements: usize,
    unresolved: BTreeSet<String>,
}

fn distinct_tokens(matches: &[TokenMatch]) -> Vec<PlaceholderToken> {
    let mut out: Vec<PlaceholderToken> = Vec::new();
    for m in matches {
        if !out.contains(&m.token) {
            out.push(m.token.clone());
        }
    }
    out
}
