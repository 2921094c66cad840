//! # amr-mrp — AMR to MRP graph conversion
//!
//! Parses Abstract Meaning Representation blocks (parenthesized,
//! variable-annotated s-expressions with `::id`/`::snt` comments) into
//! node/edge interchange records in the MRP layout.
//!
//! ## Design Principles
//!
//! 1. **Occurrence identity**: nodes are keyed by the span they came from, never by text
//! 2. **References are not nodes**: a reentrant mention is a child kind that cannot own children
//! 3. **Block-scoped failure**: one bad AMR never stops the run and never emits a partial graph
//! 4. **Pure core**: body text → graph is a function; I/O lives in the reader and exporter
//!
//! ## Quick Start
//!
//! ```rust
//! use amr_mrp::{Converter, Options};
//!
//! let text = "# ::id s1\n# ::snt The boy wants to go.\n\
//!             (w / want-01 :ARG0 (b / boy) :ARG1 (g / go-01 :ARG0 b))\n";
//!
//! let converter = Converter::new(Options { timestamp: false, ..Options::default() });
//! let report = converter.convert(text);
//! assert!(report.failures.is_empty());
//!
//! let record = &report.records[0];
//! assert_eq!(record.input, "The boy wants to go.");
//! assert_eq!(record.edges.len(), 3);
//! ```
//!
//! ## Pipeline
//!
//! | Stage | Module | Output |
//! |-------|--------|--------|
//! | Blocks & metadata | [`reader`] | [`RawBlock`] |
//! | Bracket spans | [`amr::splitter`] | [`BracketSpan`]s |
//! | Span resolution | [`amr::resolver`] | node arena + [`VariableTable`] |
//! | Root & path | [`amr::linearize`] | [`Path`] |
//! | Emission | [`export`] | [`GraphRecord`] |

#[macro_use]
mod macros;

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod amr;
pub mod config;
pub mod reader;
pub mod export;

// ============================================================================
// Re-exports: Model
// ============================================================================

pub use model::{
    AmrGraph, BracketSpan, Child, ChildTarget, Entity, Node, NodeId,
    Path, PathStep, Sentence, SpanId, StepTarget, VariableTable, WikiTitle,
};

// ============================================================================
// Re-exports: Pipeline
// ============================================================================

pub use config::{Options, TopsPolicy};
pub use reader::{BlockFailure, ParseReport, RawBlock};
pub use export::{ConversionReport, GraphRecord, RecordEdge, RecordEntity, RecordNode};

// ============================================================================
// Converter handle
// ============================================================================

/// Entry point bundling the options used for parsing and emission.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    options: Options,
}

impl Converter {
    pub fn new(options: Options) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Parse every block of `text` without emitting records.
    pub fn parse(&self, text: &str) -> ParseReport {
        reader::parse(text, &self.options)
    }

    /// Convert every block of `text`; failed blocks are listed, not emitted.
    pub fn convert(&self, text: &str) -> ConversionReport {
        let ParseReport { sentences, failures } = self.parse(text);
        let records = sentences
            .iter()
            .map(|sentence| export::to_record(sentence, &self.options))
            .collect();
        ConversionReport { records, failures }
    }

    /// Convert the first AMR block of `text`.
    pub fn convert_one(&self, text: &str) -> Result<GraphRecord> {
        let sentence = reader::parse_one(text, &self.options)?;
        Ok(export::to_record(&sentence, &self.options))
    }
}

/// Convert `text` with default options.
pub fn convert(text: &str) -> ConversionReport {
    Converter::default().convert(text)
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unbalanced parentheses at position {position}: {message}")]
    Unbalanced { position: usize, message: String },

    #[error("Missing ::id metadata")]
    MissingId,

    #[error("Input holds no AMR body")]
    MissingBody,

    #[error("Cannot resolve span {span:?}: {message}")]
    Resolution { span: String, message: String },

    #[error("Nesting deeper than the limit of {limit}")]
    DepthExceeded { limit: usize },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Broad class of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed block: parentheses or required metadata.
    Structural,
    /// Spans that could not be turned into nodes.
    Resolution,
    /// A configured limit was hit.
    Resource,
    /// Everything outside a single block.
    Io,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Unbalanced { .. } | Error::MissingId | Error::MissingBody => ErrorKind::Structural,
            Error::Resolution { .. } => ErrorKind::Resolution,
            Error::DepthExceeded { .. } => ErrorKind::Resource,
            Error::Config(_) | Error::Json(_) | Error::Io(_) => ErrorKind::Io,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
