//! Derived-value expressions
//!
//! A user-input name that starts with a COST-family base carries a chain of
//! `_`-separated suffix operators:
//!
//! ```text
//! COST                 base value
//! COST_1.1             base × 1.1
//! COST_0 / COST_00     rounded up to a multiple of 10 / 100
//! COST_IN_WORDS        "<n> rupees [and <p> paise] only"
//! COST_1.1_00_IN_WORDS multiplier, then rounding, then words
//! ```
//!
//! Names starting with `DATE` are never numeric. They may carry a display
//! format after a dot (`DATE_OF_START.LONG`).

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::money::{amount_in_words, format_inr};

/// Base identifiers of the COST family
pub const COST_BASES: [&str; 5] = ["COST", "COSTAMC", "COSTRP", "COSTCON", "COSTCAMC"];

const DATE_PREFIX: &str = "DATE";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundBucket {
    Tens,
    Hundreds,
}

impl RoundBucket {
    pub fn size(self) -> Decimal {
        match self {
            RoundBucket::Tens => Decimal::TEN,
            RoundBucket::Hundreds => Decimal::ONE_HUNDRED,
        }
    }

    fn from_token(token: &str) -> Option<Self> {
        match token {
            "0" => Some(RoundBucket::Tens),
            "00" => Some(RoundBucket::Hundreds),
            _ => None,
        }
    }
}

/// A parsed derived name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedExpression {
    pub base: String,
    /// Product of every multiplier suffix
    pub multiplier: Option<Decimal>,
    pub round_bucket: Option<RoundBucket>,
    pub as_words: bool,
    pub is_date_field: bool,
    /// Raw format suffix of a date name, validated at resolve time
    pub date_format: Option<String>,
}

impl DerivedExpression {
    /// Parse a user-input name.
    ///
    /// Returns `None` for names outside both families, and for COST-family
    /// names with an unrecognised suffix (`COST_ESTIMATE` is an ordinary
    /// user input, not a derived value).
    pub fn parse(name: &str) -> Option<Self> {
        if name.to_ascii_uppercase().starts_with(DATE_PREFIX) {
            return Some(Self::parse_date(name));
        }

        let mut tokens = name.split('_');
        let base = tokens.next()?;
        if !COST_BASES.contains(&base.to_ascii_uppercase().as_str()) {
            return None;
        }

        let mut expr = Self::plain(base);
        let mut saw_in = false;
        for token in tokens {
            let upper = token.to_ascii_uppercase();
            if upper == "IN" {
                saw_in = true;
            } else if upper == "WORDS" && saw_in {
                expr.as_words = true;
            } else if let Some(bucket) = RoundBucket::from_token(token) {
                expr.round_bucket = Some(bucket);
            } else if let Some(factor) = parse_factor(token) {
                // a factor chain too large for a decimal is not a derived name
                let product = expr.multiplier.unwrap_or(Decimal::ONE).checked_mul(factor)?;
                expr.multiplier = Some(product);
            } else {
                return None;
            }
        }

        // a dangling IN is not a words request
        if saw_in && !expr.as_words {
            return None;
        }
        Some(expr)
    }

    fn plain(base: &str) -> Self {
        Self {
            base: base.to_string(),
            multiplier: None,
            round_bucket: None,
            as_words: false,
            is_date_field: false,
            date_format: None,
        }
    }

    fn parse_date(name: &str) -> Self {
        let (base, format) = match name.split_once('.') {
            Some((base, format)) => (base, Some(format.to_string())),
            None => (name, None),
        };
        Self {
            is_date_field: true,
            date_format: format,
            ..Self::plain(base)
        }
    }

    /// True when the name is more than its base
    pub fn has_suffix(&self) -> bool {
        self.multiplier.is_some()
            || self.round_bucket.is_some()
            || self.as_words
            || self.date_format.is_some()
    }

    /// Apply multiplier then rounding to the base value.
    ///
    /// `None` when the result does not fit in a decimal.
    pub fn evaluate(&self, base_value: Decimal) -> Option<Decimal> {
        let value = match self.multiplier {
            Some(factor) => base_value.checked_mul(factor)?,
            None => base_value,
        };
        match self.round_bucket {
            Some(bucket) => round_up_to_bucket(value, bucket),
            None => Some(value),
        }
    }

    /// Evaluate and render as currency text or words
    pub fn render(&self, base_value: Decimal) -> Option<String> {
        let value = self.evaluate(base_value)?;
        Some(if self.as_words {
            amount_in_words(value)
        } else {
            format_inr(value)
        })
    }
}

/// Round away from zero to a multiple of the bucket.
///
/// A non-zero value under one bucket becomes exactly one bucket; zero stays
/// zero. Negative amounts mirror positive ones: `-125.68` rounds to `-200`
/// with the hundreds bucket. `None` when the rounded value would overflow.
pub fn round_up_to_bucket(value: Decimal, bucket: RoundBucket) -> Option<Decimal> {
    if value.is_zero() {
        return Some(Decimal::ZERO);
    }
    let size = bucket.size();
    let magnitude = (value.abs() / size).ceil().checked_mul(size)?;
    Some(if value.is_sign_negative() {
        -magnitude
    } else {
        magnitude
    })
}

fn parse_factor(token: &str) -> Option<Decimal> {
    let well_formed = !token.is_empty()
        && token.chars().all(|c| c.is_ascii_digit() || c == '.')
        && token.chars().any(|c| c.is_ascii_digit());
    if !well_formed {
        return None;
    }
    Decimal::from_str(token).ok()
}

// ── Date formats ──────────────────────────────────────────────

/// Display formats accepted after a `DATE...` name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    Dmy,
    DmyDot,
    DmySlash,
    Iso,
    Long,
}

impl DateFormat {
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix.to_ascii_uppercase().as_str() {
            "DMY" => Some(Self::Dmy),
            "DMY_DOT" => Some(Self::DmyDot),
            "DMY_SLASH" => Some(Self::DmySlash),
            "ISO" => Some(Self::Iso),
            "LONG" => Some(Self::Long),
            _ => None,
        }
    }

    fn pattern(self) -> &'static str {
        match self {
            Self::Dmy => "%d-%m-%Y",
            Self::DmyDot => "%d.%m.%Y",
            Self::DmySlash => "%d/%m/%Y",
            Self::Iso => "%Y-%m-%d",
            Self::Long => "%-d %B %Y",
        }
    }

    pub fn format(self, date: NaiveDate) -> String {
        date.format(self.pattern()).to_string()
    }

    /// Parse a date written in any of the supported shapes
    pub fn parse_any(text: &str) -> Option<NaiveDate> {
        let text = text.trim();
        [Self::Iso, Self::Dmy, Self::DmyDot, Self::DmySlash, Self::Long]
            .into_iter()
            .find_map(|f| NaiveDate::parse_from_str(text, f.pattern()).ok())
    }
}

/// Render a date value in the requested format.
///
/// Problems are reported inline as bracketed text so the rest of the
/// document still renders.
pub fn render_date(value: &str, suffix: &str) -> String {
    let Some(format) = DateFormat::from_suffix(suffix) else {
        return format!("[Invalid date format: {suffix}]");
    };
    match DateFormat::parse_any(value) {
        Some(date) => format.format(date),
        None => format!("[Invalid date: {value}]"),
    }
}
