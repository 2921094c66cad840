//! Sentence — one parsed AMR block with its metadata.

use std::fmt;

use super::AmrGraph;

/// A successfully parsed AMR block.
#[derive(Debug, Clone)]
pub struct Sentence {
    /// Value of `::id`.
    pub id: String,
    /// Value of `::snt`, empty when absent.
    pub text: String,
    /// Every `::key value` pair found in the comment lines, in order.
    pub metadata: Vec<(String, String)>,
    /// Comment lines as read, newline-terminated.
    pub comments: String,
    /// AMR body as read.
    pub raw_amr: String,
    pub graph: AmrGraph,
}

impl Sentence {
    pub fn meta(&self, key: &str) -> Option<&str> {
        self.metadata.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}{}", self.comments, self.raw_amr)
    }
}
