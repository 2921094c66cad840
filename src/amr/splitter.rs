//! Bracket splitter — cuts an AMR body into its matched-parenthesis spans.

use crate::model::{BracketSpan, SpanId};
use crate::{Error, Result};

/// An open `(` waiting for its `)`.
struct Open {
    start: usize,
    /// Spans already closed directly inside this one.
    children: Vec<usize>,
}

/// Split `body` into one [`BracketSpan`] per matched pair.
///
/// Spans come out in the order their `)` appears, so every nested span
/// precedes the span enclosing it; the span's id is its index in the result.
/// Nesting deeper than `max_depth` is an error.
pub fn split(body: &str, max_depth: usize) -> Result<Vec<BracketSpan>> {
    let mut spans: Vec<BracketSpan> = Vec::new();
    let mut stack: Vec<Open> = Vec::new();

    for (pos, ch) in body.char_indices() {
        match ch {
            '(' => {
                if stack.len() >= max_depth {
                    return Err(Error::DepthExceeded { limit: max_depth });
                }
                stack.push(Open { start: pos, children: Vec::new() });
            }
            ')' => {
                let open = stack.pop().ok_or_else(|| Error::Unbalanced {
                    position: pos,
                    message: "')' without matching '('".into(),
                })?;
                let id = spans.len();
                for child in open.children {
                    spans[child].parent = Some(SpanId(id));
                }
                spans.push(BracketSpan {
                    id: SpanId(id),
                    text: body[open.start..=pos].to_string(),
                    start: open.start,
                    end: pos + 1,
                    depth: stack.len() + 1,
                    parent: None,
                });
                if let Some(enclosing) = stack.last_mut() {
                    enclosing.children.push(id);
                }
            }
            _ => {}
        }
    }

    if let Some(open) = stack.pop() {
        return Err(Error::Unbalanced {
            position: open.start,
            message: "'(' is never closed".into(),
        });
    }

    Ok(spans)
}
