//! # AMR Graph Construction
//!
//! AMR body text → [`AmrGraph`]. Pure functions: no I/O, no state shared
//! between calls.
//!
//! ```text
//! body ── splitter::split ──> spans (closing order)
//!      ── resolver::resolve ─> node arena + variable table
//!      ── linearize ─────────> root + pre-order path
//! ```

pub mod attributes;
pub mod linearize;
pub mod resolver;
pub mod splitter;

use crate::config::Options;
use crate::model::AmrGraph;
use crate::{Error, Result};

/// Build the graph of one AMR body.
pub fn parse(body: &str, options: &Options) -> Result<AmrGraph> {
    let spans = splitter::split(body, options.max_depth)?;
    let mut graph = resolver::resolve(spans)?;

    let root = linearize::select_root(&graph, body).ok_or_else(|| Error::Resolution {
        span: body.trim().to_string(),
        message: "no span resolved to a node".into(),
    })?;
    graph.path = linearize::linearize(&graph, root, options.max_depth)?;
    graph.root = Some(root);

    Ok(graph)
}

/// Check that `body` has parentheses and as many `(` as `)`.
pub fn validate(body: &str) -> Result<()> {
    let open = body.matches('(').count();
    let close = body.matches(')').count();
    if open == 0 || close == 0 {
        return Err(Error::Unbalanced { position: 0, message: "no parentheses".into() });
    }
    if open != close {
        return Err(Error::Unbalanced {
            position: body.len(),
            message: format!("{open} '(' against {close} ')'"),
        });
    }
    Ok(())
}
