//! Shared fixtures for the integration tests
//!
//! One work (id 42) with two registered firms: Alpha Constructions has
//! submitted its PG, Beta Infra has a paperwork row without one. Gamma
//! Builders is registered but has no paperwork at all.

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use works_docgen::{FirmDocument, InMemoryDataSource, Work, WorkId};

pub const WORK_ID: WorkId = 42;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn clock() -> NaiveDateTime {
    date(2026, 10, 19).and_hms_opt(11, 30, 0).unwrap()
}

pub fn work() -> Work {
    Work::new(WORK_ID, "Construction of check dam at Rampur")
        .with_description("Check dam across the Rampur nala")
        .with_field("estimate_no", "EST/2024/17")
        .with_field("cost", Decimal::new(12568, 2))
        .with_field("date_of_start", date(2024, 4, 1))
}

pub fn alpha() -> FirmDocument {
    let mut doc = FirmDocument::new(1, WORK_ID, "Alpha Constructions");
    doc.pg_submitted = true;
    doc.pg_no = Some("PG/881".into());
    doc.pg_amount = Some(Decimal::new(12500050, 2));
    doc.pg_bank_name = Some("State Bank of India".into());
    doc.pg_bank_address = Some("Main Road, Rampur".into());
    doc.pg_submission_date = Some(date(2024, 5, 2));
    doc
}

pub fn beta() -> FirmDocument {
    FirmDocument::new(2, WORK_ID, "Beta Infra")
}

/// Source with the two firms that have paperwork rows
pub fn two_firm_source() -> InMemoryDataSource {
    let mut source = InMemoryDataSource::new();
    source
        .add_work(work())
        .register_firm(WORK_ID, "Alpha Constructions")
        .register_firm(WORK_ID, "Beta Infra")
        .upsert_document(alpha())
        .upsert_document(beta());
    source
}

/// Adds a third firm with no paperwork row
pub fn three_firm_source() -> InMemoryDataSource {
    let mut source = two_firm_source();
    source.register_firm(WORK_ID, "Gamma Builders");
    source
}
