//! Document generation for works, firms and performance guarantees
//!
//! Templates are documents whose paragraphs carry placeholders in three
//! delimiter families:
//!
//! | Syntax          | Namespace  | Resolved from                          |
//! |-----------------|------------|----------------------------------------|
//! | `[NAME]`        | work       | the work record, render clock          |
//! | `<<NAME>>`      | firm       | the firm in scope and its PG paperwork |
//! | `{{NAME}}`      | user input | values typed in by the user            |
//!
//! `[ALL_FIRMS_PG_DETAILS]` expands to a numbered summary of every firm's
//! performance guarantee. User inputs in the COST family derive multiplied,
//! rounded and worded amounts (`{{COST_00}}`, `{{COSTRP_1.1}}`,
//! `{{COST_IN_WORDS}}`); `DATE...` inputs accept a format suffix.
//!
//! Anything that cannot be resolved stays in the output verbatim.
//!
//! # Example
//!
//! ```ignore
//! let template = load_template("letters/loa.json")?;
//! let report = DocumentGenerator::new(&source, &config).generate(
//!     &template,
//!     &GenerationRequest::new(42).with_firms(FirmSelection::All),
//! )?;
//! save_document(&report.document, "out/loa-42.json")?;
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod expand;
pub mod expression;
pub mod generator;
pub mod grammar;
pub mod inventory;
pub mod io;
pub mod money;
pub mod pg_details;
pub mod render;
pub mod resolver;
pub mod source;
pub mod store;

pub use config::{ConfigLoader, EngineConfig};
pub use context::DataContext;
pub use error::{ConfigError, DocgenError, SourceError, StoreError, TemplateError};
pub use expand::MultiEntityExpander;
pub use expression::{DateFormat, DerivedExpression, RoundBucket};
pub use generator::{DocumentGenerator, FirmSelection, GenerationReport, GenerationRequest};
pub use grammar::{PlaceholderToken, ALL_FIRMS_PG_DETAILS};
pub use inventory::PlaceholderInventory;
pub use io::{load_template, save_document};
pub use render::{DocumentRenderer, RenderOutcome};
pub use resolver::{Namespace, Resolver, RESOLUTION_ORDER};
pub use source::{DataSource, InMemoryDataSource};
pub use store::ValueStore;

pub use docgen_types::{Block, Document, FirmDocument, Paragraph, Work, WorkId};
