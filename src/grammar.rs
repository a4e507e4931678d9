//! Placeholder grammar
//!
//! Three delimiter shapes, each mapping to one token kind:
//!
//! ```text
//! {{name}}                  user input   (letters, digits, '_', '.')
//! [NAME]                    work field   (letters, digits, '_')
//! <<NAME>>                  firm field   (letters, digits, '_')
//! [ALL_FIRMS_PG_DETAILS]    aggregate PG block (checked before work fields)
//! ```
//!
//! All four live in one alternation so a single left-to-right scan yields
//! non-overlapping matches; the kind is decided by which group matched,
//! never by the name.

use std::collections::BTreeSet;
use std::fmt;
use std::ops::Range;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::expression::DerivedExpression;

pub const ALL_FIRMS_PG_DETAILS: &str = "ALL_FIRMS_PG_DETAILS";

static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"\{\{(?P<user>[a-zA-Z0-9_.]+)\}\}",
        r"|(?P<all>\[ALL_FIRMS_PG_DETAILS\])",
        r"|\[(?P<work>[A-Za-z0-9_]+)\]",
        r"|<<(?P<firm>[A-Za-z0-9_]+)>>",
    ))
    .unwrap()
});

/// A classified placeholder
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PlaceholderToken {
    UserInput { name: String },
    WorkField { name: String },
    FirmField { name: String },
    AllFirmsBlock,
}

impl PlaceholderToken {
    /// The placeholder exactly as it appears in a template
    pub fn literal(&self) -> String {
        match self {
            Self::UserInput { name } => format!("{{{{{name}}}}}"),
            Self::WorkField { name } => format!("[{name}]"),
            Self::FirmField { name } => format!("<<{name}>>"),
            Self::AllFirmsBlock => format!("[{ALL_FIRMS_PG_DETAILS}]"),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::UserInput { name } | Self::WorkField { name } | Self::FirmField { name } => name,
            Self::AllFirmsBlock => ALL_FIRMS_PG_DETAILS,
        }
    }

    pub fn is_firm_scoped(&self) -> bool {
        matches!(self, Self::FirmField { .. })
    }

    fn from_captures(caps: &Captures<'_>) -> Option<Self> {
        if let Some(m) = caps.name("user") {
            Some(Self::UserInput {
                name: m.as_str().to_string(),
            })
        } else if caps.name("all").is_some() {
            Some(Self::AllFirmsBlock)
        } else if let Some(m) = caps.name("work") {
            Some(Self::WorkField {
                name: m.as_str().to_string(),
            })
        } else {
            caps.name("firm").map(|m| Self::FirmField {
                name: m.as_str().to_string(),
            })
        }
    }
}

impl fmt::Display for PlaceholderToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.literal())
    }
}

/// One occurrence of a placeholder in scanned text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenMatch {
    pub token: PlaceholderToken,
    /// Byte range of the full placeholder, delimiters included
    pub span: Range<usize>,
}

/// Every placeholder occurrence in `text`, left to right
pub fn scan(text: &str) -> Vec<TokenMatch> {
    PLACEHOLDER_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let token = PlaceholderToken::from_captures(&caps)?;
            Some(TokenMatch {
                token,
                span: whole.range(),
            })
        })
        .collect()
}

/// Distinct placeholders in `text`, in first-occurrence order
pub fn extract(text: &str) -> Vec<PlaceholderToken> {
    let mut seen = BTreeSet::new();
    scan(text)
        .into_iter()
        .filter_map(|m| seen.insert(m.token.clone()).then_some(m.token))
        .collect()
}

/// Reduce user-input names to what a human has to type in.
///
/// Derived names (`COST_00`, `COST_IN_WORDS`, `DATE_OF_START.LONG`) are
/// replaced by their base name; duplicates collapse. Resolution still
/// honours the derived names, this only shapes entry forms.
pub fn base_placeholders<'a>(names: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for name in names {
        let base = match DerivedExpression::parse(name) {
            Some(expr) if expr.has_suffix() => expr.base,
            _ => name.to_string(),
        };
        if !out.contains(&base) {
            out.push(base);
        }
    }
    out
}
