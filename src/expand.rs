//! Multi-firm expansion
//!
//! Renders the template once per firm, each pass with that firm in scope,
//! and concatenates the rendered bodies into one document:
//!
//! ```text
//! [firm 1 body] PageBreak [firm 2 body] PageBreak ... [firm N body]
//! ```
//!
//! Header and footer come from the first firm's pass. A firm without a
//! paperwork row is still rendered; its paperwork placeholders stay literal.

use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDateTime;
use docgen_types::{Block, Document, Work};
use tracing::{info, warn};

use crate::config::EngineConfig;
use crate::context::DataContext;
use crate::error::SourceError;
use crate::render::{DocumentRenderer, RenderOutcome};
use crate::source::DataSource;

/// Renders one document per firm and stitches them together
pub struct MultiEntityExpander<'a> {
    source: &'a dyn DataSource,
    config: &'a EngineConfig,
}

impl<'a> MultiEntityExpander<'a> {
    pub fn new(source: &'a dyn DataSource, config: &'a EngineConfig) -> Self {
        Self { source, config }
    }

    /// Render `template` for every firm in `firms`, in the order given.
    ///
    /// With an empty firm list the template is rendered once without a
    /// firm in scope.
    pub fn render_for_all_firms(
        &self,
        template: &Document,
        work: &Work,
        firms: &[String],
        overrides: &HashMap<String, String>,
        now: NaiveDateTime,
    ) -> Result<RenderOutcome, SourceError> {
        if firms.is_empty() {
            warn!(work_id = work.id, "No firms registered, rendering without firm scope");
            let ctx = DataContext::new(self.source, work, overrides, self.config).at(now);
            return Ok(DocumentRenderer::render(template, &ctx));
        }

        let mut master: Option<Document> = None;
        let mut unresolved = BTreeSet::new();
        let mut replacements = 0;

        for firm in firms {
            let document = self.source.get_firm_document(work.id, firm)?;
            if document.is_none() {
                warn!(work_id = work.id, firm = %firm, "No paperwork on record for firm");
            }

            let ctx = DataContext::new(self.source, work, overrides, self.config)
                .with_firm(firm, document.as_ref())
                .at(now);
            let pass = DocumentRenderer::render(template, &ctx);
            unresolved.extend(pass.unresolved);
            replacements += pass.replacements;

            match master.as_mut() {
                None => master = Some(pass.document),
                Some(doc) => {
                    if self.config.page_break_between_firms {
                        doc.body.push(Block::PageBreak);
                    }
                    doc.body.extend(pass.document.body);
                }
            }
        }

        info!(
            work_id = work.id,
            firms = firms.len(),
            replacements,
            "Rendered template for all firms"
        );

        Ok(RenderOutcome {
            document: master.unwrap_or_default(),
            unresolved,
            replacements,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::InMemoryDataSource;
    use chrono::NaiveDate;
    use docgen_types::{FirmDocument, WorkId};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 1, 2)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn firms(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    struct BrokenSource;

    impl DataSource for BrokenSource {
        fn get_work(&self, _: WorkId) -> Result<Option<Work>, SourceError> {
            Ok(None)
        }

        fn get_firm_names(&self, _: WorkId) -> Result<Vec<String>, SourceError> {
            Ok(Vec::new())
        }

        fn get_firm_document(&self, _: WorkId, _: &str) -> Result<Option<FirmDocument>, SourceError> {
            Err(SourceError::Unavailable {
                message: "connection reset".into(),
            })
        }

        fn get_all_firm_documents(&self, _: WorkId) -> Result<Vec<FirmDocument>, SourceError> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_one_body_per_firm_with_breaks_between() {
        let mut source = InMemoryDataSource::new();
        source.upsert_document(FirmDocument::new(1, 3, "Alpha"));
        let work = Work::new(3, "Culvert");
        let config = EngineConfig::default();
        let template = Document::from_body_lines(["To <<FIRM_NAME>>", "Re: [WORK_NAME]"]);

        let out = MultiEntityExpander::new(&source, &config)
            .render_for_all_firms(&template, &work, &firms(&["Alpha", "Beta", "Gamma"]), &HashMap::new(), now())
            .unwrap();

        assert_eq!(out.document.page_break_count(), 2);
        assert_eq!(
            out.document.plain_text(),
            "To Alpha\nRe: Culvert\nTo Beta\nRe: Culvert\nTo Gamma\nRe: Culvert"
        );
        assert!(out.unresolved.is_empty());
    }

    #[test]
    fn test_single_firm_has_no_break() {
        let source = InMemoryDataSource::new();
        let work = Work::new(3, "Culvert");
        let config = EngineConfig::default();
        let template = Document::from_body_lines(["<<FIRM_NAME>>"]);

        let out = MultiEntityExpander::new(&source, &config)
            .render_for_all_firms(&template, &work, &firms(&["Solo"]), &HashMap::new(), now())
            .unwrap();
        assert_eq!(out.document.page_break_count(), 0);
        assert_eq!(out.document.plain_text(), "Solo");
    }

    #[test]
    fn test_breaks_can_be_disabled() {
        let source = InMemoryDataSource::new();
        let work = Work::new(3, "Culvert");
        let config = EngineConfig {
            page_break_between_firms: false,
            ..Default::default()
        };
        let template = Document::from_body_lines(["<<FIRM_NAME>>"]);

        let out = MultiEntityExpander::new(&source, &config)
            .render_for_all_firms(&template, &work, &firms(&["A", "B"]), &HashMap::new(), now())
            .unwrap();
        assert_eq!(out.document.page_break_count(), 0);
        assert_eq!(out.document.body.len(), 2);
    }

    #[test]
    fn test_missing_paperwork_leaves_fields_literal() {
        let source = InMemoryDataSource::new();
        let work = Work::new(3, "Culvert");
        let config = EngineConfig::default();
        let template = Document::from_body_lines(["<<FIRM_NAME>> <<PG_NO>>"]);

        let out = MultiEntityExpander::new(&source, &config)
            .render_for_all_firms(&template, &work, &firms(&["Alpha"]), &HashMap::new(), now())
            .unwrap();
        assert_eq!(out.document.plain_text(), "Alpha <<PG_NO>>");
        assert!(out.unresolved.contains("<<PG_NO>>"));
    }

    #[test]
    fn test_empty_firm_list_renders_once_unscoped() {
        let source = InMemoryDataSource::new();
        let work = Work::new(3, "Culvert");
        let config = EngineConfig::default();
        let template = Document::from_body_lines(["<<FIRM_NAME>> [WORK_NAME]"]);

        let out = MultiEntityExpander::new(&source, &config)
            .render_for_all_firms(&template, &work, &[], &HashMap::new(), now())
            .unwrap();
        assert_eq!(out.document.plain_text(), "<<FIRM_NAME>> Culvert");
    }

    #[test]
    fn test_source_failure_is_propagated() {
        let work = Work::new(3, "Culvert");
        let config = EngineConfig::default();
        let template = Document::from_body_lines(["<<FIRM_NAME>>"]);

        let err = MultiEntityExpander::new(&BrokenSource, &config)
            .render_for_all_firms(&template, &work, &firms(&["Alpha"]), &HashMap::new(), now())
            .unwrap_err();
        assert!(matches!(err, SourceError::Unavailable { .. }));
    }
}
