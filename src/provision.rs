//! The Provision type: one legal unit as delivered by the parser.
//!
//! Provisions come from a one-shot XHTML extraction of the Official Journal
//! text and are usually exchanged as a JSON dump:
//!
//! ```text
//! [
//!   { "id": "art_5", "type": "article", "number": "5",
//!     "title": "Article 5 — Prohibited AI practices",
//!     "text": "1. The following ...\n\n2. The use of ...",
//!     "chapter": "II", "chapter_title": "PROHIBITED AI PRACTICES",
//!     "paragraphs": [ { "id": "005.001", "text": "1. The following ..." }, ... ],
//!     "lang": "en" },
//!   { "id": "rct_1", "type": "recital", ... },
//!   { "id": "anx_III", "type": "annex", ... }
//! ]
//! ```
//!
//! The chunker consumes this shape as-is. In particular `text` is the
//! authoritative body: for articles with paragraphs it already equals the
//! paragraph texts joined by a blank line, and it is never rebuilt here.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::{Error, Result};

/// Default language of the parsed corpus.
pub const DEFAULT_LANG: &str = "de";

/// The kind of a provision, which selects its chunking strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProvisionKind {
    /// An article, possibly split into numbered paragraphs.
    Article,
    /// A recital from the preamble.
    Recital,
    /// An annex.
    Annex,
    /// Any other type string. Never chunked.
    #[serde(other)]
    Unknown,
}

impl ProvisionKind {
    /// The type string used in chunk metadata.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Article => "article",
            Self::Recital => "recital",
            Self::Annex => "annex",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ProvisionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A numbered paragraph of an article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Paragraph id, e.g. `"005.001"`.
    pub id: String,
    /// Plain text of the paragraph.
    pub text: String,
}

impl Paragraph {
    /// Create a paragraph.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// A legal unit: article, recital or annex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provision {
    /// Corpus-unique id (`art_5`, `rct_12`, `anx_III`).
    pub id: String,
    /// Provision kind.
    #[serde(rename = "type")]
    pub kind: ProvisionKind,
    /// Display number, decimal or Roman.
    pub number: String,
    /// Human-readable heading.
    pub title: String,
    /// Full plain-text body.
    pub text: String,
    /// Chapter number, articles only.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub chapter: Option<String>,
    /// Chapter heading, articles only.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub chapter_title: Option<String>,
    /// Numbered paragraphs; empty when the provision has no sub-structure.
    #[serde(default)]
    pub paragraphs: Vec<Paragraph>,
    /// Language of the text.
    #[serde(default = "default_lang")]
    pub lang: String,
}

fn default_lang() -> String {
    DEFAULT_LANG.to_string()
}

// The parser writes "" for missing chapter context.
fn empty_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

impl Provision {
    /// Create a provision of the given kind with no chapter and no paragraphs.
    pub fn new(
        kind: ProvisionKind,
        id: impl Into<String>,
        number: impl Into<String>,
        title: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            number: number.into(),
            title: title.into(),
            text: text.into(),
            chapter: None,
            chapter_title: None,
            paragraphs: Vec::new(),
            lang: default_lang(),
        }
    }

    /// Create an article.
    pub fn article(
        id: impl Into<String>,
        number: impl Into<String>,
        title: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self::new(ProvisionKind::Article, id, number, title, text)
    }

    /// Create a recital.
    pub fn recital(
        id: impl Into<String>,
        number: impl Into<String>,
        title: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self::new(ProvisionKind::Recital, id, number, title, text)
    }

    /// Create an annex.
    pub fn annex(
        id: impl Into<String>,
        number: impl Into<String>,
        title: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self::new(ProvisionKind::Annex, id, number, title, text)
    }

    /// Set the chapter context.
    #[must_use]
    pub fn with_chapter(mut self, chapter: impl Into<String>, title: impl Into<String>) -> Self {
        self.chapter = Some(chapter.into());
        self.chapter_title = Some(title.into());
        self
    }

    /// Set the paragraphs and derive `text` from them (blank-line joined).
    #[must_use]
    pub fn with_paragraphs(mut self, paragraphs: Vec<Paragraph>) -> Self {
        self.text = paragraphs
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");
        self.paragraphs = paragraphs;
        self
    }

    /// Set the language code.
    #[must_use]
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    /// The header repeated at the top of every chunk: title plus a blank line.
    #[must_use]
    pub fn header(&self) -> String {
        format!("{}\n\n", self.title)
    }

    /// Whether the provision carries paragraph structure.
    #[must_use]
    pub fn has_paragraphs(&self) -> bool {
        !self.paragraphs.is_empty()
    }

    /// Check the chunker's input contract.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidProvision`] if the id is empty, the body is
    /// blank, or a paragraph has blank text.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::invalid(&self.id, "empty id"));
        }
        if self.text.trim().is_empty() {
            return Err(Error::invalid(&self.id, "blank text"));
        }
        if self.paragraphs.iter().any(|p| p.text.trim().is_empty()) {
            return Err(Error::invalid(&self.id, "paragraph with blank text"));
        }
        Ok(())
    }
}

/// Load provisions from a JSON dump.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a JSON array of
/// provisions.
pub fn load_provisions(path: impl AsRef<Path>) -> Result<Vec<Provision>> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

/// Save provisions as a pretty-printed JSON dump, creating parent directories.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save_provisions(provisions: &[Provision], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, provisions)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_is_title_and_blank_line() {
        let p = Provision::recital("rct_1", "1", "Recital 1", "Body.");
        assert_eq!(p.header(), "Recital 1\n\n");
    }

    #[test]
    fn test_with_paragraphs_joins_text() {
        let p = Provision::article("art_1", "1", "Article 1", "").with_paragraphs(vec![
            Paragraph::new("001.001", "1. First."),
            Paragraph::new("001.002", "2. Second."),
        ]);
        assert_eq!(p.text, "1. First.\n\n2. Second.");
        assert!(p.has_paragraphs());
    }

    #[test]
    fn test_validate_rejects_blank_text() {
        let p = Provision::annex("anx_I", "I", "ANNEX I", "  \n ");
        assert!(matches!(
            p.validate(),
            Err(Error::InvalidProvision { reason: "blank text", .. })
        ));
    }

    #[test]
    fn test_validate_rejects_empty_id() {
        let p = Provision::annex("", "I", "ANNEX I", "Text.");
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_blank_paragraph() {
        let mut p = Provision::article("art_2", "2", "Article 2", "Text.");
        p.paragraphs.push(Paragraph::new("002.001", ""));
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_deserialize_parser_dump() {
        let json = r#"{
            "id": "art_5", "type": "article", "number": "5",
            "title": "Article 5", "text": "a\n\nb",
            "chapter": "II", "chapter_title": "",
            "paragraphs": [{"id": "005.001", "text": "a"}, {"id": "005.002", "text": "b"}],
            "lang": "en"
        }"#;
        let p: Provision = serde_json::from_str(json).unwrap();
        assert_eq!(p.kind, ProvisionKind::Article);
        assert_eq!(p.chapter.as_deref(), Some("II"));
        assert_eq!(p.chapter_title, None);
        assert_eq!(p.paragraphs.len(), 2);
        assert_eq!(p.lang, "en");
    }

    #[test]
    fn test_unknown_type_deserializes() {
        let json = r#"{"id": "x", "type": "footnote", "number": "1", "title": "t", "text": "b"}"#;
        let p: Provision = serde_json::from_str(json).unwrap();
        assert_eq!(p.kind, ProvisionKind::Unknown);
        assert_eq!(p.lang, DEFAULT_LANG);
        assert!(p.paragraphs.is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("provisions.json");
        let provisions = vec![
            Provision::article("art_1", "1", "Article 1", "Subject matter.")
                .with_chapter("I", "GENERAL PROVISIONS"),
            Provision::recital("rct_1", "1", "Recital 1", "The purpose."),
        ];
        save_provisions(&provisions, &path).unwrap();
        assert_eq!(load_provisions(&path).unwrap(), provisions);
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            load_provisions("/nonexistent/provisions.json"),
            Err(Error::Io(_))
        ));
    }
}
