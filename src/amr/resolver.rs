//! Span resolution — turns bracket spans into nodes.
//!
//! Leaf spans (one pair of parentheses) are resolved first, then composite
//! spans in closing order, so every nested span already has its node when its
//! parent is spliced together. Nodes live in the graph arena at their span's
//! id; text is never used to find a node.

use hashbrown::HashMap;
use tracing::debug;

use super::attributes::{self, Attribute, Head};
use crate::model::{AmrGraph, BracketSpan, Child, ChildTarget, Children, Entity, Node, NodeId};
use crate::{Error, Result};

/// Variable and concept given to a leaf span without a `var / concept` head.
pub const HEADLESS: &str = "-";

/// Resolve every span and return the populated graph (no root or path yet).
pub fn resolve(spans: Vec<BracketSpan>) -> Result<AmrGraph> {
    let mut resolver = Resolver::new(spans);

    let (leaves, composites): (Vec<usize>, Vec<usize>) =
        (0..resolver.graph.spans.len()).partition(|&i| resolver.graph.spans[i].is_leaf());

    for &i in leaves.iter().chain(&composites) {
        if let Some(head) = attributes::head(&resolver.graph.spans[i].text) {
            resolver.definitions.insert(head.variable, NodeId(i));
        }
    }

    for i in leaves {
        let node = resolver.resolve_leaf(i)?;
        resolver.graph.insert(node);
    }
    for i in composites {
        if let Some(node) = resolver.resolve_composite(i)? {
            resolver.graph.insert(node);
        }
    }

    Ok(resolver.graph)
}

struct Resolver {
    graph: AmrGraph,
    /// Variable → span defining it, known before any span is resolved so that
    /// a mention ahead of its definition still resolves to a reference.
    definitions: HashMap<String, NodeId>,
    /// Directly nested spans of each span, in source order.
    nested: Vec<Vec<usize>>,
}

impl Resolver {
    fn new(spans: Vec<BracketSpan>) -> Self {
        let mut nested = vec![Vec::new(); spans.len()];
        for span in &spans {
            if let Some(parent) = span.parent {
                nested[parent.0].push(span.id.0);
            }
        }
        Self { graph: AmrGraph::with_spans(spans), definitions: HashMap::new(), nested }
    }

    fn resolve_leaf(&self, i: usize) -> Result<Node> {
        let span = &self.graph.spans[i];
        if !span.is_leaf() {
            return Err(resolution(span, format!("leaf span holds {} parenthesis pairs", span.pair_count())));
        }

        let attrs = attributes::scan(&span.text, span.start);
        let head = attributes::head(&span.text).unwrap_or_else(|| Head {
            variable: HEADLESS.into(),
            concept: HEADLESS.into(),
        });
        Ok(self.build(span, head, Children::new(), &attrs))
    }

    fn resolve_composite(&self, i: usize) -> Result<Option<Node>> {
        let span = &self.graph.spans[i];
        let mut residual = span.text.clone();
        let mut children = Children::new();
        let mut name_child: Option<NodeId> = None;

        for &c in &self.nested[i] {
            let nested = &self.graph.spans[c];
            let rel_start = nested.start - span.start;
            let rel_end = nested.end - span.start;

            let Some(node) = self.graph.node(NodeId(c)) else {
                blank(&mut residual, rel_start, rel_end);
                continue;
            };
            let (role_start, role) = preceding_role(&residual[..rel_start]).ok_or_else(|| {
                resolution(span, format!("nested span {} has no role before it", nested.id))
            })?;
            let role = role.to_string();
            blank(&mut residual, role_start, rel_end);

            if role == ":name" && name_child.is_none() {
                name_child = Some(node.id);
            }
            children.push(Child {
                label: role,
                target: ChildTarget::Nested(node.id),
                offset: span.start + role_start,
            });
        }

        let attrs = attributes::scan(&residual, span.start);
        let Some(head) = attributes::head(&residual) else {
            if children.is_empty() && name_child.is_none() {
                debug!(span = %span.id, "dropping span consumed by nested structure");
                return Ok(None);
            }
            return Err(resolution(span, "no `variable / concept` head left after splicing nested spans".into()));
        };

        let mut node = self.build(span, head, children, &attrs);
        if let Some(name_id) = name_child {
            let name = self
                .graph
                .node(name_id)
                .and_then(|n| n.entity_name.clone())
                .unwrap_or_default();
            node.entity = Some(Entity {
                entity_type: node.concept.clone(),
                name,
                wiki: attributes::wiki_title(&attrs),
                name_node: name_id,
            });
        }
        Ok(Some(node))
    }

    /// Assemble a node from its head, already spliced children and inline attributes.
    fn build(&self, span: &BracketSpan, head: Head, mut children: Children, attrs: &[Attribute]) -> Node {
        for attr in attrs {
            let target = match self.definitions.get(attr.value.as_str()) {
                Some(&id) if !attr.is_quoted() => ChildTarget::Reference(id),
                _ => ChildTarget::Constant(attr.value.clone()),
            };
            children.push(Child { label: attr.role.clone(), target, offset: attr.offset });
        }
        children.sort_by_key(|c| c.offset);

        debug!(
            span = %span.id,
            variable = %head.variable,
            concept = %head.concept,
            children = children.len(),
            "resolved span"
        );

        Node {
            id: NodeId::from(span.id),
            variable: head.variable,
            concept: head.concept,
            children,
            polarity: attributes::has_negative_polarity(attrs),
            entity_name: attributes::quoted_name(attrs),
            entity: None,
            source_text: span.text.clone(),
        }
    }
}

/// The `:role` token ending `prefix`, with its byte offset.
fn preceding_role(prefix: &str) -> Option<(usize, &str)> {
    let trimmed = prefix.trim_end();
    let start = trimmed
        .char_indices()
        .rev()
        .find(|&(_, c)| c.is_whitespace() || c == '(' || c == ')')
        .map_or(0, |(p, c)| p + c.len_utf8());
    let token = &trimmed[start..];
    (token.len() > 1 && token.starts_with(':')).then_some((start, token))
}

/// Overwrite `text[start..end]` with spaces, keeping every offset in place.
fn blank(text: &mut String, start: usize, end: usize) {
    text.replace_range(start..end, &" ".repeat(end - start));
}

fn resolution(span: &BracketSpan, message: String) -> Error {
    Error::Resolution { span: span.text.clone(), message }
}
