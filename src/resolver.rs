//! Placeholder resolution
//!
//! Maps each token kind to its namespace and resolves it against a
//! [`DataContext`]. `None` means unresolved: the caller leaves the literal
//! placeholder in place.

use tracing::trace;

use crate::context::DataContext;
use crate::expression::{render_date, DerivedExpression};
use crate::grammar::PlaceholderToken;

/// Data namespaces, one per delimiter family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    Work,
    Firm,
    UserInput,
}

impl Namespace {
    pub fn of(token: &PlaceholderToken) -> Self {
        match token {
            PlaceholderToken::WorkField { .. } | PlaceholderToken::AllFirmsBlock => Namespace::Work,
            PlaceholderToken::FirmField { .. } => Namespace::Firm,
            PlaceholderToken::UserInput { .. } => Namespace::UserInput,
        }
    }
}

/// Pass order. When two passes would both claim the same placeholder text
/// the earlier pass wins.
pub const RESOLUTION_ORDER: [Namespace; 3] = [Namespace::Work, Namespace::Firm, Namespace::UserInput];

/// A token together with what it resolved to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub token: PlaceholderToken,
    pub value: Option<String>,
}

/// Resolves placeholder tokens against a data context
pub struct Resolver;

impl Resolver {
    /// Resolve one token
    pub fn resolve(token: &PlaceholderToken, ctx: &DataContext<'_>) -> Option<String> {
        let value = match token {
            PlaceholderToken::WorkField { name } => Self::resolve_work_field(name, ctx),
            PlaceholderToken::AllFirmsBlock => ctx.pg_block(),
            PlaceholderToken::FirmField { name } => ctx.firm_attribute(name),
            PlaceholderToken::UserInput { name } => Self::resolve_user_input(name, ctx),
        };
        trace!(%token, resolved = value.is_some(), "resolve");
        value
    }

    /// Resolve tokens namespace by namespace in [`RESOLUTION_ORDER`]
    pub fn resolve_in_order(tokens: &[PlaceholderToken], ctx: &DataContext<'_>) -> Vec<Resolution> {
        RESOLUTION_ORDER
            .iter()
            .flat_map(|ns| tokens.iter().filter(move |t| Namespace::of(t) == *ns))
            .map(|token| Resolution {
                token: token.clone(),
                value: Self::resolve(token, ctx),
            })
            .collect()
    }

    fn resolve_work_field(name: &str, ctx: &DataContext<'_>) -> Option<String> {
        match name.to_ascii_uppercase().as_str() {
            "CURRENT_DATE" => Some(ctx.now().format(&ctx.config().date_format).to_string()),
            "CURRENT_TIME" => Some(ctx.now().format(&ctx.config().time_format).to_string()),
            "FIRM_PG_DETAILS" | "ALL_FIRMS_PG_DETAILS" => ctx.pg_block(),
            _ => ctx.work_attribute(name),
        }
    }

    /// Derived names first (COST family, DATE family), then the overrides
    fn resolve_user_input(name: &str, ctx: &DataContext<'_>) -> Option<String> {
        match DerivedExpression::parse(name) {
            Some(expr) if expr.is_date_field => match expr.date_format.as_deref() {
                Some(format) => ctx
                    .date_text(&expr.base)
                    .map(|value| render_date(&value, format)),
                None => ctx.user_value(name),
            },
            Some(expr) => ctx.numeric_value(&expr.base).and_then(|v| expr.render(v)),
            None => ctx.override_value(name),
        }
    }
}
