//! Read-only business records the engine resolves placeholders against.
//!
//! Records are owned by an external store; the engine never writes them.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub type WorkId = i64;

/// A scalar work attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    Text(String),
    Amount(Decimal),
    Date(NaiveDate),
    Integer(i64),
    Flag(bool),
}

impl FieldValue {
    /// Numeric view of the value.
    ///
    /// Text is accepted when it parses as a decimal once grouping commas
    /// are removed ("1,25,000.50").
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            FieldValue::Amount(d) => Some(*d),
            FieldValue::Integer(i) => Some(Decimal::from(*i)),
            FieldValue::Text(s) => Decimal::from_str(&s.trim().replace(',', "")).ok(),
            FieldValue::Date(_) | FieldValue::Flag(_) => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<Decimal> for FieldValue {
    fn from(value: Decimal) -> Self {
        FieldValue::Amount(value)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        FieldValue::Date(value)
    }
}

/// The central business record (a contract/project)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Work {
    pub id: WorkId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Open-ended scalar attributes keyed by lower snake case name
    /// (`justification`, `section`, `estimate_no`, `amount_of_contract`, ...)
    #[serde(default)]
    pub fields: BTreeMap<String, FieldValue>,
}

impl Work {
    pub fn new(id: WorkId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            fields: BTreeMap::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn field(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }
}

/// Guarantee and indemnity-bond paperwork one firm lodged for one work.
///
/// Unique on `(work_id, firm_name)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirmDocument {
    pub id: i64,
    pub work_id: WorkId,
    pub firm_name: String,

    // Performance guarantee
    #[serde(default)]
    pub pg_no: Option<String>,
    #[serde(default)]
    pub pg_amount: Option<Decimal>,
    #[serde(default)]
    pub pg_bank_name: Option<String>,
    #[serde(default)]
    pub pg_bank_address: Option<String>,
    #[serde(default)]
    pub pg_submission_date: Option<NaiveDate>,
    #[serde(default)]
    pub pg_vetting_date: Option<NaiveDate>,
    #[serde(default)]
    pub pg_submitted: bool,

    // Indemnity bond
    #[serde(default)]
    pub indemnity_bond_no: Option<String>,
    #[serde(default)]
    pub indemnity_bond_amount: Option<Decimal>,
    #[serde(default)]
    pub indemnity_bond_date: Option<NaiveDate>,
    #[serde(default)]
    pub indemnity_bond_submitted: bool,
}

impl FirmDocument {
    pub fn new(id: i64, work_id: WorkId, firm_name: impl Into<String>) -> Self {
        Self {
            id,
            work_id,
            firm_name: firm_name.into(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_value_as_decimal() {
        assert_eq!(
            FieldValue::Text("1,25,000.50".into()).as_decimal(),
            Some(Decimal::from_str("125000.50").unwrap())
        );
        assert_eq!(FieldValue::Integer(7).as_decimal(), Some(Decimal::from(7)));
        assert_eq!(FieldValue::Text("n/a".into()).as_decimal(), None);
        assert_eq!(FieldValue::Flag(true).as_decimal(), None);
    }

    #[test]
    fn test_work_json_uses_kind_tags() {
        let work = Work::new(3, "Road resurfacing")
            .with_field("estimate_no", "EST/42")
            .with_field("start_date", NaiveDate::from_ymd_opt(2024, 4, 1).unwrap());
        let json = serde_json::to_value(&work).unwrap();
        assert_eq!(json["fields"]["estimate_no"]["kind"], "text");
        assert_eq!(json["fields"]["start_date"]["kind"], "date");

        let back: Work = serde_json::from_value(json).unwrap();
        assert_eq!(back, work);
    }
}
