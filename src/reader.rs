//! Sentence assembler — splits AMR text into blocks and parses each one.
//!
//! A block is a run of non-blank lines: `#` comment lines carrying
//! `::key value` metadata, then the AMR body. Every failure is scoped to its
//! block; the rest of the input is still parsed.

use tracing::{debug, info, warn};

use crate::amr;
use crate::config::Options;
use crate::model::Sentence;
use crate::{Error, Result};

/// One block split into comments and body, before any AMR parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawBlock {
    pub comments: String,
    pub raw_amr: String,
    pub metadata: Vec<(String, String)>,
}

impl RawBlock {
    /// Separate comment lines from body lines and read their metadata.
    pub fn read(block: &str) -> Self {
        let mut raw = RawBlock::default();
        for line in block.lines() {
            if line.trim_start().starts_with('#') {
                raw.comments.push_str(line);
                raw.comments.push('\n');
                read_metadata(line, &mut raw.metadata);
            } else {
                raw.raw_amr.push_str(line);
                raw.raw_amr.push('\n');
            }
        }
        raw
    }

    pub fn meta(&self, key: &str) -> Option<&str> {
        self.metadata.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    pub fn id(&self) -> Option<&str> {
        self.meta("id").filter(|id| !id.is_empty())
    }

    pub fn has_body(&self) -> bool {
        !self.raw_amr.trim().is_empty()
    }
}

/// A block that could not be turned into a sentence.
#[derive(Debug)]
pub struct BlockFailure {
    /// Position of the block in the input, counting from 0.
    pub index: usize,
    pub id: Option<String>,
    pub error: Error,
}

/// Outcome of parsing a whole input.
#[derive(Debug, Default)]
pub struct ParseReport {
    pub sentences: Vec<Sentence>,
    pub failures: Vec<BlockFailure>,
}

/// Split `text` on blank lines, dropping blocks that are empty.
pub fn split_blocks(text: &str) -> Vec<&str> {
    regex!(r"\n\s*\n")
        .split(text)
        .filter(|block| !block.trim().is_empty())
        .collect()
}

/// Parse every block of `text`.
pub fn parse(text: &str, options: &Options) -> ParseReport {
    let mut report = ParseReport::default();

    for (index, block) in split_blocks(text).into_iter().enumerate() {
        let raw = RawBlock::read(block);
        if !raw.has_body() {
            debug!(block = index, "skipping block without AMR body");
            continue;
        }
        match assemble(raw.clone(), options) {
            Ok(sentence) => {
                info!(block = index, id = %sentence.id, nodes = sentence.graph.variables().len(), "parsed sentence");
                report.sentences.push(sentence);
            }
            Err(error) => {
                let id = raw.id().map(str::to_string);
                warn!(block = index, id = ?id, %error, "skipping block");
                report.failures.push(BlockFailure { index, id, error });
            }
        }
    }

    report
}

/// Parse the first block of `text` that has an AMR body.
pub fn parse_one(text: &str, options: &Options) -> Result<Sentence> {
    let raw = split_blocks(text)
        .into_iter()
        .map(RawBlock::read)
        .find(RawBlock::has_body)
        .ok_or(Error::MissingBody)?;
    assemble(raw, options)
}

/// Turn one block into a sentence.
pub fn assemble(raw: RawBlock, options: &Options) -> Result<Sentence> {
    let id = raw.id().ok_or(Error::MissingId)?.to_string();
    let text = raw.meta("snt").unwrap_or_default().to_string();

    amr::validate(&raw.raw_amr)?;
    let graph = amr::parse(&raw.raw_amr, options)?;

    Ok(Sentence {
        id,
        text,
        metadata: raw.metadata,
        comments: raw.comments,
        raw_amr: raw.raw_amr,
        graph,
    })
}

/// Collect the `::key value` pairs of one comment line.
///
/// A value runs up to the next `::key` on the line; `::snt` runs to the end of
/// the line since sentence text may itself contain anything.
fn read_metadata(line: &str, metadata: &mut Vec<(String, String)>) {
    let keys: Vec<_> = regex!(r"(?:^|\s)::([^\s:]+)").captures_iter(line).collect();

    for (n, caps) in keys.iter().enumerate() {
        let (Some(whole), Some(key)) = (caps.get(0), caps.get(1)) else { continue };
        let key = key.as_str();
        let value_end = if key == "snt" {
            line.len()
        } else {
            keys.get(n + 1).and_then(|next| next.get(0)).map_or(line.len(), |m| m.start())
        };
        metadata.push((key.to_string(), line[whole.end()..value_end].trim().to_string()));
        if key == "snt" {
            break;
        }
    }
}
