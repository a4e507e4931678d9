//! Generation facade
//!
//! One call from a work id and a template to a rendered document:
//!
//! 1. check the config formats, then fetch the work (a missing work is an
//!    error)
//! 2. pick the firm selection
//! 3. run a single render pass, or one pass per firm when every firm was
//!    asked for and the template has firm placeholders
//! 4. report what is still unresolved

use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use chrono::NaiveDateTime;
use docgen_types::{Document, WorkId};
use tracing::{info, warn};

use crate::config::EngineConfig;
use crate::context::DataContext;
use crate::error::DocgenError;
use crate::expand::MultiEntityExpander;
use crate::inventory::PlaceholderInventory;
use crate::io;
use crate::render::DocumentRenderer;
use crate::source::DataSource;

/// Which firms a document is generated for
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FirmSelection {
    /// Work-level document, firm placeholders stay literal
    #[default]
    None,
    /// One firm in scope
    Single(String),
    /// Every firm registered against the work, one section each
    All,
}

#[derive(Debug, Clone, Default)]
pub struct GenerationRequest {
    pub work_id: WorkId,
    pub firms: FirmSelection,
    /// User-entered values for `{{...}}` placeholders
    pub overrides: HashMap<String, String>,
    /// Render clock; local now when unset
    pub now: Option<NaiveDateTime>,
}

impl GenerationRequest {
    pub fn new(work_id: WorkId) -> Self {
        Self {
            work_id,
            ..Default::default()
        }
    }

    pub fn with_firms(mut self, firms: FirmSelection) -> Self {
        self.firms = firms;
        self
    }

    pub fn with_override(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.overrides.insert(name.into(), value.into());
        self
    }

    pub fn at(mut self, now: NaiveDateTime) -> Self {
        self.now = Some(now);
        self
    }
}

#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub document: Document,
    /// Placeholders left literal in the output
    pub unresolved: BTreeSet<String>,
    pub replacements: usize,
    /// Firms rendered, in output order
    pub firms_rendered: Vec<String>,
}

impl GenerationReport {
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }
}

pub struct DocumentGenerator<'a> {
    source: &'a dyn DataSource,
    config: &'a EngineConfig,
}

impl<'a> DocumentGenerator<'a> {
    pub fn new(source: &'a dyn DataSource, config: &'a EngineConfig) -> Self {
        Self { source, config }
    }

    pub fn generate(
        &self,
        template: &Document,
        request: &GenerationRequest,
    ) -> Result<GenerationReport, DocgenError> {
        self.config.validate()?;
        let work = self
            .source
            .get_work(request.work_id)?
            .ok_or(DocgenError::WorkNotFound(request.work_id))?;
        let now = request
            .now
            .unwrap_or_else(|| chrono::Local::now().naive_local());

        let report = match &request.firms {
            FirmSelection::All if PlaceholderInventory::collect(template).has_firm_tokens() => {
                let firms = self.source.get_firm_names(work.id)?;
                let outcome = MultiEntityExpander::new(self.source, self.config)
                    .render_for_all_firms(template, &work, &firms, &request.overrides, now)?;
                GenerationReport {
                    document: outcome.document,
                    unresolved: outcome.unresolved,
                    replacements: outcome.replacements,
                    firms_rendered: firms,
                }
            }
            FirmSelection::Single(firm) => {
                let document = self.source.get_firm_document(work.id, firm)?;
                if document.is_none() {
                    warn!(work_id = work.id, firm = %firm, "No paperwork on record for firm");
                }
                let ctx = DataContext::new(self.source, &work, &request.overrides, self.config)
                    .with_firm(firm, document.as_ref())
                    .at(now);
                let outcome = DocumentRenderer::render(template, &ctx);
                GenerationReport {
                    document: outcome.document,
                    unresolved: outcome.unresolved,
                    replacements: outcome.replacements,
                    firms_rendered: vec![firm.clone()],
                }
            }
            FirmSelection::None | FirmSelection::All => {
                let ctx = DataContext::new(self.source, &work, &request.overrides, self.config)
                    .at(now);
                let outcome = DocumentRenderer::render(template, &ctx);
                GenerationReport {
                    document: outcome.document,
                    unresolved: outcome.unresolved,
                    replacements: outcome.replacements,
                    firms_rendered: Vec::new(),
                }
            }
        };

        info!(
            work_id = work.id,
            replacements = report.replacements,
            unresolved = report.unresolved.len(),
            firms = report.firms_rendered.len(),
            "Generated document"
        );
        Ok(report)
    }

    /// Load a template file, generate, and save the result to `out`
    pub fn generate_to_file(
        &self,
        template_path: impl AsRef<Path>,
        request: &GenerationRequest,
        out: impl AsRef<Path>,
    ) -> Result<GenerationReport, DocgenError> {
        let template = io::load_template(template_path)?;
        let report = self.generate(&template, request)?;
        io::save_document(&report.document, out)?;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::InMemoryDataSource;
    use chrono::NaiveDate;
    use docgen_types::{FirmDocument, Work};

    fn source() -> InMemoryDataSource {
        let mut source = InMemoryDataSource::new();
        source
            .add_work(Work::new(5, "Canal lining"))
            .register_firm(5, "Alpha")
            .register_firm(5, "Beta");
        let mut doc = FirmDocument::new(1, 5, "Alpha");
        doc.pg_no = Some("PG-1".into());
        source.upsert_document(doc);
        source
    }

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 4)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_missing_work() {
        let source = source();
        let config = EngineConfig::default();
        let template = Document::from_body_lines(["[WORK_NAME]"]);
        let err = DocumentGenerator::new(&source, &config)
            .generate(&template, &GenerationRequest::new(404))
            .unwrap_err();
        assert!(matches!(err, DocgenError::WorkNotFound(404)));
    }

    #[test]
    fn test_invalid_date_format_fails_before_rendering() {
        let source = source();
        let config = EngineConfig {
            date_format: "%Q".to_string(),
            ..Default::default()
        };
        let template = Document::from_body_lines(["[CURRENT_DATE]"]);
        let err = DocumentGenerator::new(&source, &config)
            .generate(&template, &GenerationRequest::new(5))
            .unwrap_err();
        assert!(matches!(
            err,
            DocgenError::Config(crate::error::ConfigError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_all_firms_expands_when_template_has_firm_tokens() {
        let source = source();
        let config = EngineConfig::default();
        let template = Document::from_body_lines(["<<FIRM_NAME>>: [WORK_NAME]"]);
        let request = GenerationRequest::new(5).with_firms(FirmSelection::All).at(now());

        let report = DocumentGenerator::new(&source, &config)
            .generate(&template, &request)
            .unwrap();
        assert_eq!(report.firms_rendered, vec!["Alpha", "Beta"]);
        assert_eq!(report.document.page_break_count(), 1);
        assert_eq!(
            report.document.plain_text(),
            "Alpha: Canal lining\nBeta: Canal lining"
        );
        assert!(report.is_complete());
    }

    #[test]
    fn test_all_firms_without_firm_tokens_renders_once() {
        let source = source();
        let config = EngineConfig::default();
        let template = Document::from_body_lines(["[WORK_NAME]"]);
        let request = GenerationRequest::new(5).with_firms(FirmSelection::All);

        let report = DocumentGenerator::new(&source, &config)
            .generate(&template, &request)
            .unwrap();
        assert!(report.firms_rendered.is_empty());
        assert_eq!(report.document.plain_text(), "Canal lining");
    }

    #[test]
    fn test_single_firm() {
        let source = source();
        let config = EngineConfig::default();
        let template = Document::from_body_lines(["<<FIRM_NAME>> <<PG_NO>> {{REF}}"]);
        let request = GenerationRequest::new(5)
            .with_firms(FirmSelection::Single("Alpha".into()))
            .with_override("REF", "R/1");

        let report = DocumentGenerator::new(&source, &config)
            .generate(&template, &request)
            .unwrap();
        assert_eq!(report.document.plain_text(), "Alpha PG-1 R/1");
        assert_eq!(report.replacements, 3);
    }

    #[test]
    fn test_unscoped_leaves_firm_tokens_and_reports_them() {
        let source = source();
        let config = EngineConfig::default();
        let template = Document::from_body_lines(["<<FIRM_NAME>> {{REF}}"]);

        let report = DocumentGenerator::new(&source, &config)
            .generate(&template, &GenerationRequest::new(5))
            .unwrap();
        assert_eq!(report.document.plain_text(), "<<FIRM_NAME>> {{REF}}");
        assert_eq!(
            report.unresolved,
            BTreeSet::from(["<<FIRM_NAME>>".to_string(), "{{REF}}".to_string()])
        );
    }
}
