//! Shared Types for works-docgen
//!
//! This crate is the SINGLE SOURCE OF TRUTH for the shapes that cross the
//! engine boundary: the structured document tree that templates and
//! rendered outputs are stored as, and the read-only records the engine
//! resolves placeholders against.
//!
//! ## Boundaries
//!
//! ```text
//! ┌──────────────────┐  JSON   ┌──────────────────┐
//! │  Template file   │ ──────► │  Document tree   │ ──► renderer
//! └──────────────────┘         └──────────────────┘
//! ┌──────────────────┐         ┌──────────────────┐
//! │  Records store   │ ──────► │ Work / FirmDoc   │ ──► data context
//! └──────────────────┘         └──────────────────┘
//! ```
//!
//! ## Rules
//!
//! 1. Plain data only - no resolution logic lives here
//! 2. Tagged enums only: `#[serde(tag = "type")]` / `#[serde(tag = "kind")]`
//! 3. Money is `rust_decimal::Decimal`, never floating point

pub mod document;
pub mod records;

pub use document::{Alignment, Block, Document, Paragraph, Region, Run, RunFormat, Table, TableCell, TableRow};
pub use records::{FieldValue, FirmDocument, Work, WorkId};
