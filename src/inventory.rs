//! Placeholder inventory of a template
//!
//! Used to build manual-entry forms and to decide whether a template needs
//! one pass per firm.

use std::collections::BTreeSet;

use docgen_types::Document;
use serde::Serialize;

use crate::grammar::{self, PlaceholderToken};

/// Distinct placeholder names per kind, sorted
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlaceholderInventory {
    pub user_inputs: BTreeSet<String>,
    pub work_fields: BTreeSet<String>,
    pub firm_fields: BTreeSet<String>,
    pub all_firms_block: bool,
}

impl PlaceholderInventory {
    /// Scan every paragraph in header, body and footer
    pub fn collect(document: &Document) -> Self {
        let mut inventory = Self::default();
        for (_, paragraph) in document.paragraphs() {
            for token in grammar::extract(&paragraph.text()) {
                match token {
                    PlaceholderToken::UserInput { name } => {
                        inventory.user_inputs.insert(name);
                    }
                    PlaceholderToken::WorkField { name } => {
                        inventory.work_fields.insert(name);
                    }
                    PlaceholderToken::FirmField { name } => {
                        inventory.firm_fields.insert(name);
                    }
                    PlaceholderToken::AllFirmsBlock => inventory.all_firms_block = true,
                }
            }
        }
        inventory
    }

    pub fn has_firm_tokens(&self) -> bool {
        !self.firm_fields.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.user_inputs.is_empty()
            && self.work_fields.is_empty()
            && self.firm_fields.is_empty()
            && !self.all_firms_block
    }

    /// User inputs a person has to type in, derived names reduced to their
    /// base, sorted
    pub fn user_inputs_for_entry(&self) -> Vec<String> {
        let mut names = grammar::base_placeholders(self.user_inputs.iter().map(String::as_str));
        names.sort();
        names
    }
}
