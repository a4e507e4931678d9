//! Per-pass data context
//!
//! A [`DataContext`] is built once per render pass and borrows everything it
//! resolves against: the work, the optional firm in scope with its
//! paperwork row, and the caller's override map. The aggregate PG block is
//! fetched from the data source on first use only.

use std::cell::OnceCell;
use std::collections::HashMap;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use docgen_types::{FieldValue, FirmDocument, Work};
use rust_decimal::Decimal;
use tracing::warn;

use crate::config::EngineConfig;
use crate::money::format_inr;
use crate::pg_details;
use crate::source::DataSource;

pub const PG_SUBMITTED: &str = "submitted the PG No.";
pub const PG_NOT_SUBMITTED: &str = "did not submit the PG";
pub const INDEMNITY_BOND_SUBMITTED: &str = "submitted the Indemnity Bond No.";
pub const INDEMNITY_BOND_NOT_SUBMITTED: &str = "did not submit the Indemnity Bond";

/// The firm a pass is rendered for
#[derive(Debug, Clone, Copy)]
pub struct FirmScope<'a> {
    pub name: &'a str,
    /// `None` when the firm has no paperwork row for this work
    pub document: Option<&'a FirmDocument>,
}

pub struct DataContext<'a> {
    source: &'a dyn DataSource,
    work: &'a Work,
    firm: Option<FirmScope<'a>>,
    overrides: &'a HashMap<String, String>,
    config: &'a EngineConfig,
    now: NaiveDateTime,
    pg_block: OnceCell<Option<String>>,
}

impl<'a> DataContext<'a> {
    /// Work-level context with the render clock set to local now
    pub fn new(
        source: &'a dyn DataSource,
        work: &'a Work,
        overrides: &'a HashMap<String, String>,
        config: &'a EngineConfig,
    ) -> Self {
        Self {
            source,
            work,
            firm: None,
            overrides,
            config,
            now: chrono::Local::now().naive_local(),
            pg_block: OnceCell::new(),
        }
    }

    /// Scope the context to one firm
    pub fn with_firm(mut self, name: &'a str, document: Option<&'a FirmDocument>) -> Self {
        self.firm = Some(FirmScope { name, document });
        self
    }

    /// Pin the render clock
    pub fn at(mut self, now: NaiveDateTime) -> Self {
        self.now = now;
        self
    }

    pub fn work(&self) -> &Work {
        self.work
    }

    pub fn firm(&self) -> Option<FirmScope<'a>> {
        self.firm
    }

    pub fn config(&self) -> &EngineConfig {
        self.config
    }

    pub fn now(&self) -> NaiveDateTime {
        self.now
    }

    // ── User-input namespace ──────────────────────────────────

    pub fn override_value(&self, name: &str) -> Option<String> {
        self.overrides.get(name).cloned()
    }

    /// Override first, then the work field of the same (lower-cased) name
    pub fn user_value(&self, name: &str) -> Option<String> {
        self.override_value(name)
            .or_else(|| self.work_field(name).map(|v| self.display_field(v)))
    }

    /// Numeric base value for a derived expression
    pub fn numeric_value(&self, name: &str) -> Option<Decimal> {
        match self.overrides.get(name) {
            Some(text) => Decimal::from_str(&text.trim().replace(',', "")).ok(),
            None => self.work_field(name).and_then(FieldValue::as_decimal),
        }
    }

    /// Date text for reformatting; stored dates come back in ISO form
    pub fn date_text(&self, name: &str) -> Option<String> {
        if let Some(text) = self.override_value(name) {
            return Some(text);
        }
        match self.work_field(name)? {
            FieldValue::Date(date) => Some(date.format("%Y-%m-%d").to_string()),
            other => Some(self.display_field(other)),
        }
    }

    // ── Work namespace ────────────────────────────────────────

    /// Work attribute by placeholder name (`WORK_NAME`, `ESTIMATE_NO`, ...)
    pub fn work_attribute(&self, name: &str) -> Option<String> {
        match name.to_ascii_uppercase().as_str() {
            "NAME" | "WORK_NAME" | "NAME_OF_WORK" => Some(self.work.name.clone()),
            "DESCRIPTION" | "WORK_DESCRIPTION" => Some(self.work.description.clone()),
            "ID" | "WORK_ID" => Some(self.work.id.to_string()),
            _ => self.work_field(name).map(|v| self.display_field(v)),
        }
    }

    fn work_field(&self, name: &str) -> Option<&FieldValue> {
        self.work.field(&name.to_ascii_lowercase())
    }

    fn display_field(&self, value: &FieldValue) -> String {
        match value {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Amount(d) => format_inr(*d),
            FieldValue::Date(d) => self.format_date(*d),
            FieldValue::Integer(i) => i.to_string(),
            FieldValue::Flag(true) => "Yes".to_string(),
            FieldValue::Flag(false) => "No".to_string(),
        }
    }

    pub fn format_date(&self, date: NaiveDate) -> String {
        date.format(&self.config.date_format).to_string()
    }

    /// The aggregate PG block for every firm registered against the work
    pub fn pg_block(&self) -> Option<String> {
        self.pg_block
            .get_or_init(|| {
                let work_id = self.work.id;
                let names = self.source.get_firm_names(work_id);
                let documents = self.source.get_all_firm_documents(work_id);
                match (names, documents) {
                    (Ok(names), Ok(documents)) => Some(pg_details::format_all(
                        &documents,
                        &names,
                        &self.config.date_format,
                    )),
                    (Err(e), _) | (_, Err(e)) => {
                        warn!(work_id, "PG details unavailable: {e}");
                        None
                    }
                }
            })
            .clone()
    }

    // ── Firm namespace ────────────────────────────────────────

    /// Firm attribute by placeholder name (`FIRM_NAME`, `PG_AMOUNT`, ...).
    ///
    /// Outside a firm pass everything is unresolved. Inside one, the firm
    /// name always resolves; paperwork fields need a paperwork row.
    pub fn firm_attribute(&self, name: &str) -> Option<String> {
        let scope = self.firm?;
        let key = name.to_ascii_lowercase();
        if matches!(key.as_str(), "firm_name" | "name") {
            return Some(scope.name.to_string());
        }

        let doc = scope.document?;
        let date = |d: Option<NaiveDate>| d.map(|d| self.format_date(d));
        match key.as_str() {
            "pg_submitted" => Some(
                if doc.pg_submitted {
                    PG_SUBMITTED
                } else {
                    PG_NOT_SUBMITTED
                }
                .to_string(),
            ),
            "indemnity_bond_submitted" => Some(
                if doc.indemnity_bond_submitted {
                    INDEMNITY_BOND_SUBMITTED
                } else {
                    INDEMNITY_BOND_NOT_SUBMITTED
                }
                .to_string(),
            ),
            "pg_no" => doc.pg_no.clone(),
            "pg_amount" => doc.pg_amount.map(format_inr),
            "pg_bank_name" | "bank_name" => doc.pg_bank_name.clone(),
            "pg_bank_address" | "bank_address" => doc.pg_bank_address.clone(),
            "pg_submission_date" | "pg_date" => date(doc.pg_submission_date),
            "pg_vetting_date" => date(doc.pg_vetting_date),
            "indemnity_bond_no" => doc.indemnity_bond_no.clone(),
            "indemnity_bond_amount" => doc.indemnity_bond_amount.map(format_inr),
            "indemnity_bond_date" => date(doc.indemnity_bond_date),
            _ => None,
        }
    }
}
