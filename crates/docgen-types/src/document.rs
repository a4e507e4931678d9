//! Structured document tree
//!
//! A document is three regions (header, body, footer), each an ordered list
//! of blocks. A block is a paragraph of formatted runs, a table whose cells
//! hold paragraphs, or an explicit page break. Templates and rendered
//! outputs share this shape, so a rendered document can itself be fed back
//! in as a template.

use serde::{Deserialize, Serialize};

// ============================================================================
// RUNS
// ============================================================================

/// Character formatting carried by a run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunFormat {
    #[serde(default, skip_serializing_if = "is_false")]
    pub bold: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub italic: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub underline: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
    /// Font size in half points (Word convention: 24 = 12pt)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_half_points: Option<u32>,
    /// RGB hex colour without the leading '#'
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// A contiguous span of text sharing one format
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    pub text: String,
    #[serde(default)]
    pub format: RunFormat,
}

impl Run {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            format: RunFormat::default(),
        }
    }

    pub fn with_format(text: impl Into<String>, format: RunFormat) -> Self {
        Self {
            text: text.into(),
            format,
        }
    }
}

// ============================================================================
// PARAGRAPHS AND TABLES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    Left,
    Center,
    Right,
    Justify,
}

/// A paragraph: the unit the renderer matches placeholders in
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
    #[serde(default)]
    pub runs: Vec<Run>,
}

impl Paragraph {
    /// Paragraph with a single unformatted run
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            runs: vec![Run::new(text)],
            ..Default::default()
        }
    }

    pub fn from_runs(runs: Vec<Run>) -> Self {
        Self {
            runs,
            ..Default::default()
        }
    }

    /// Concatenated text of every run
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCell {
    #[serde(default)]
    pub paragraphs: Vec<Paragraph>,
}

impl TableCell {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            paragraphs: vec![Paragraph::from_text(text)],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    #[serde(default)]
    pub cells: Vec<TableCell>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default)]
    pub rows: Vec<TableRow>,
}

impl Table {
    /// Build a table from rows of plain cell text
    pub fn from_rows<R, C>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self {
            style: None,
            rows: rows
                .into_iter()
                .map(|cells| TableRow {
                    cells: cells.into_iter().map(TableCell::from_text).collect(),
                })
                .collect(),
        }
    }
}

// ============================================================================
// BLOCKS AND DOCUMENT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Paragraph(Paragraph),
    Table(Table),
    PageBreak,
}

impl Block {
    pub fn paragraph(text: impl Into<String>) -> Self {
        Block::Paragraph(Paragraph::from_text(text))
    }
}

/// Which part of the document a paragraph lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Header,
    Body,
    Footer,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub header: Vec<Block>,
    #[serde(default)]
    pub body: Vec<Block>,
    #[serde(default)]
    pub footer: Vec<Block>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Document whose body is one paragraph per line of `text`
    pub fn from_body_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            body: lines.into_iter().map(Block::paragraph).collect(),
            ..Default::default()
        }
    }

    /// Every paragraph in header, body and footer order, including those
    /// nested in table cells.
    pub fn paragraphs(&self) -> Vec<(Region, &Paragraph)> {
        let mut out = Vec::new();
        for (region, blocks) in self.regions() {
            for block in blocks {
                match block {
                    Block::Paragraph(p) => out.push((region, p)),
                    Block::Table(t) => {
                        for cell in t.rows.iter().flat_map(|r| r.cells.iter()) {
                            out.extend(cell.paragraphs.iter().map(|p| (region, p)));
                        }
                    }
                    Block::PageBreak => {}
                }
            }
        }
        out
    }

    /// Visit every paragraph mutably, in the same order as [`Document::paragraphs`]
    pub fn for_each_paragraph_mut(&mut self, mut visit: impl FnMut(Region, &mut Paragraph)) {
        let regions = [
            (Region::Header, &mut self.header),
            (Region::Body, &mut self.body),
            (Region::Footer, &mut self.footer),
        ];
        for (region, blocks) in regions {
            for block in blocks.iter_mut() {
                match block {
                    Block::Paragraph(p) => visit(region, p),
                    Block::Table(t) => {
                        for cell in t.rows.iter_mut().flat_map(|r| r.cells.iter_mut()) {
                            for p in cell.paragraphs.iter_mut() {
                                visit(region, p);
                            }
                        }
                    }
                    Block::PageBreak => {}
                }
            }
        }
    }

    fn regions(&self) -> [(Region, &Vec<Block>); 3] {
        [
            (Region::Header, &self.header),
            (Region::Body, &self.body),
            (Region::Footer, &self.footer),
        ]
    }

    pub fn page_break_count(&self) -> usize {
        self.body
            .iter()
            .filter(|b| matches!(b, Block::PageBreak))
            .count()
    }

    /// All paragraph text, one line per paragraph
    pub fn plain_text(&self) -> String {
        self.paragraphs()
            .into_iter()
            .map(|(_, p)| p.text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
