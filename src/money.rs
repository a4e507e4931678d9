//! Rupee formatting: Indian digit grouping and amounts in words.
//!
//! Amounts are rounded to paise (two places, half away from zero) before
//! either rendering.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

const ONES: [&str; 20] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen",
    "nineteen",
];

const TENS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

const CRORE: u128 = 10_000_000;
const LAKH: u128 = 100_000;
const THOUSAND: u128 = 1_000;

/// Rupees and paise of an amount, sign split off
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Split {
    negative: bool,
    rupees: u128,
    paise: u32,
}

fn split(value: Decimal) -> Split {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let abs = rounded.abs();
    let whole = abs.trunc();
    let paise = ((abs - whole) * Decimal::ONE_HUNDRED)
        .round()
        .to_u32()
        .unwrap_or(0);
    Split {
        negative: rounded.is_sign_negative() && !rounded.is_zero(),
        rupees: whole.to_u128().unwrap_or(0),
        paise,
    }
}

/// Format an amount with Indian grouping and two decimals: `12,34,567.50`
pub fn format_inr(value: Decimal) -> String {
    let parts = split(value);
    let sign = if parts.negative { "-" } else { "" };
    format!(
        "{sign}{}.{:02}",
        group_indian(&parts.rupees.to_string()),
        parts.paise
    )
}

/// Insert commas after the last three digits, then every two
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);

    let mut groups = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (h, t) = rest.split_at(rest.len() - 2);
        groups.push(t);
        rest = h;
    }
    if !rest.is_empty() {
        groups.push(rest);
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

/// Amount in words: `one hundred twenty five rupees and fifty paise only`.
///
/// The paise clause is dropped when the paise component is zero.
pub fn amount_in_words(value: Decimal) -> String {
    let parts = split(value);
    let mut out = String::new();
    if parts.negative {
        out.push_str("minus ");
    }
    out.push_str(&number_in_words(parts.rupees));
    out.push_str(" rupees");
    if parts.paise > 0 {
        out.push_str(" and ");
        out.push_str(&number_in_words(u128::from(parts.paise)));
        out.push_str(" paise");
    }
    out.push_str(" only");
    out
}

/// Whole number in words using the Indian scale (crore, lakh, thousand)
pub fn number_in_words(n: u128) -> String {
    if n == 0 {
        return ONES[0].to_string();
    }

    let mut parts = Vec::new();
    let mut rest = n;

    let crores = rest / CRORE;
    rest %= CRORE;
    if crores > 0 {
        parts.push(format!("{} crore", number_in_words(crores)));
    }

    let lakhs = rest / LAKH;
    rest %= LAKH;
    if lakhs > 0 {
        parts.push(format!("{} lakh", below_hundred(lakhs)));
    }

    let thousands = rest / THOUSAND;
    rest %= THOUSAND;
    if thousands > 0 {
        parts.push(format!("{} thousand", below_hundred(thousands)));
    }

    let hundreds = rest / 100;
    rest %= 100;
    if hundreds > 0 {
        parts.push(format!("{} hundred", ONES[hundreds as usize]));
    }

    if rest > 0 {
        parts.push(below_hundred(rest));
    }

    parts.join(" ")
}

fn below_hundred(n: u128) -> String {
    let n = n as usize;
    if n < 20 {
        ONES[n].to_string()
    } else if n % 10 == 0 {
        TENS[n / 10].to_string()
    } else {
        format!("{} {}", TENS[n / 10], ONES[n % 10])
    }
}
