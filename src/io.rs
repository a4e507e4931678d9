//! Template and document files
//!
//! Documents are stored as JSON serialisations of the document tree. Saves
//! go through a temporary file in the target directory that is renamed
//! into place, so a failed save never leaves a partial file behind.

use std::io::Write;
use std::path::Path;

use docgen_types::Document;
use tracing::info;

use crate::error::TemplateError;

/// Load a template; missing or malformed files are hard failures
pub fn load_template(path: impl AsRef<Path>) -> Result<Document, TemplateError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(TemplateError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|source| TemplateError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let document: Document =
        serde_json::from_str(&content).map_err(|source| TemplateError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;

    info!(
        paragraphs = document.paragraphs().len(),
        "Loaded template {}",
        path.display()
    );
    Ok(document)
}

/// Save a rendered document
pub fn save_document(document: &Document, path: impl AsRef<Path>) -> Result<(), TemplateError> {
    let path = path.as_ref();
    let bytes = serde_json::to_vec_pretty(document)?;
    write_atomic(path, &bytes).map_err(|source| TemplateError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Saved document to {}", path.display());
    Ok(())
}

/// Write `bytes` to `path` via a sibling temporary file
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use docgen_types::Block;

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("letter.json");
        let doc = Document {
            header: vec![Block::paragraph("Office of the Executive Engineer")],
            body: vec![Block::paragraph("To <<FIRM_NAME>>"), Block::PageBreak],
            footer: vec![],
        };

        save_document(&doc, &path).unwrap();
        assert_eq!(load_template(&path).unwrap(), doc);
    }

    #[test]
    fn test_missing_template_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_template(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, TemplateError::NotFound { .. }));
    }

    #[test]
    fn test_malformed_template() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{"body": [{"type": "chart"}]}"#).unwrap();
        let err = load_template(&path).unwrap_err();
        assert!(matches!(err, TemplateError::Malformed { .. }));
    }

    #[test]
    fn test_failed_save_leaves_nothing_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("out.json");
        let err = save_document(&Document::new(), &path).unwrap_err();
        assert!(matches!(err, TemplateError::Write { .. }));
        assert!(!path.exists());
    }
}
