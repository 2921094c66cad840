//! Root selection and pre-order linearization.

use std::cmp::Reverse;

use tracing::warn;

use crate::model::{AmrGraph, ChildTarget, Node, NodeId, Path, PathStep, StepTarget};
use crate::{Error, Result};

/// Pick the root among the resolved spans.
///
/// The longest span wins. Between equally long spans, one whose text is the
/// whole trimmed body is preferred, then the one discovered first.
pub fn select_root(graph: &AmrGraph, body: &str) -> Option<NodeId> {
    let whole = body.trim();

    let top_level = graph.spans().iter().filter(|s| s.parent.is_none()).count();
    if top_level > 1 {
        warn!(top_level, "body holds more than one top-level span; keeping the longest");
    }

    graph
        .spans()
        .iter()
        .filter(|s| graph.node(NodeId::from(s.id)).is_some())
        .min_by_key(|s| (Reverse(s.len()), s.text != whole, s.id))
        .map(|s| NodeId::from(s.id))
}

/// Walk the graph depth-first from `root`, children left to right.
///
/// Each child yields one step before its own subtree. References yield their
/// step and stop, so shared nodes appear once per mention and never recurse.
/// The walk keeps its own stack, so `max_depth` is the only depth limit.
pub fn linearize(graph: &AmrGraph, root: NodeId, max_depth: usize) -> Result<Path> {
    let mut path = Path::default();
    path.push(PathStep {
        parent: None,
        target: StepTarget::Node(root),
        label: String::new(),
        reference: false,
    });

    if max_depth == 0 {
        return Err(Error::DepthExceeded { limit: max_depth });
    }
    // (node, index of its next child)
    let mut stack: Vec<(&Node, usize)> = vec![(lookup(graph, root)?, 0)];

    while let Some(frame) = stack.last_mut() {
        let (node, next) = *frame;
        frame.1 += 1;
        let Some(child) = node.children.get(next) else {
            stack.pop();
            continue;
        };

        let target = match &child.target {
            ChildTarget::Nested(c) | ChildTarget::Reference(c) => StepTarget::Node(*c),
            ChildTarget::Constant(token) => StepTarget::Constant(token.clone()),
        };
        path.push(PathStep {
            parent: Some(node.id),
            target,
            label: child.label.clone(),
            reference: child.is_reference(),
        });

        if let ChildTarget::Nested(c) = child.target {
            if stack.len() >= max_depth {
                return Err(Error::DepthExceeded { limit: max_depth });
            }
            stack.push((lookup(graph, c)?, 0));
        }
    }
    Ok(path)
}

fn lookup(graph: &AmrGraph, id: NodeId) -> Result<&Node> {
    graph.node(id).ok_or_else(|| Error::Resolution {
        span: String::new(),
        message: format!("path reaches unresolved node {id}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amr::{resolver, splitter};
    use crate::model::{Child, Children};

    fn build(body: &str) -> AmrGraph {
        resolver::resolve(splitter::split(body, 100).unwrap()).unwrap()
    }

    fn triples(graph: &mut AmrGraph, body: &str) -> Vec<(String, String, String)> {
        let root = select_root(graph, body).unwrap();
        graph.path = linearize(graph, root, 100).unwrap();
        graph.triples()
    }

    fn t(p: &str, c: &str, l: &str) -> (String, String, String) {
        (p.into(), c.into(), l.into())
    }

    #[test]
    fn test_root_is_whole_body() {
        let body = "(b / buy-01 :ARG0 (p / person))\n";
        let graph = build(body);
        let root = select_root(&graph, body).unwrap();
        assert_eq!(graph.variable_of(root), "b");
    }

    #[test]
    fn test_root_tie_prefers_first_discovered() {
        let body = "(a / xx) (b / yy)";
        let graph = build(body);
        let root = select_root(&graph, body).unwrap();
        assert_eq!(graph.variable_of(root), "a");
    }

    #[test]
    fn test_root_longest_top_level() {
        let body = "(a / x) (b / yyyy)";
        let graph = build(body);
        let root = select_root(&graph, body).unwrap();
        assert_eq!(graph.variable_of(root), "b");
    }

    #[test]
    fn test_preorder_path() {
        let body = "(a / x :ARG0 (b / y :mod (c / z)) :ARG1 (d / w))";
        let mut graph = build(body);
        assert_eq!(
            triples(&mut graph, body),
            vec![
                t("@", "a", ""),
                t("a", "b", ":ARG0"),
                t("b", "c", ":mod"),
                t("a", "d", ":ARG1"),
            ]
        );
    }

    #[test]
    fn test_references_do_not_descend() {
        let body = "(w / want-01 :ARG0 (b / boy :mod (t / tall)) :ARG1 (g / go-01 :ARG0 b))";
        let mut graph = build(body);
        let steps = triples(&mut graph, body);
        assert_eq!(steps.iter().filter(|s| s.1 == "b").count(), 2);
        assert_eq!(steps.iter().filter(|s| s.1 == "t").count(), 1);
        assert_eq!(steps.last().unwrap(), &t("g", "b", ":ARG0"));
        assert!(graph.path().steps.last().unwrap().reference);
    }

    #[test]
    fn test_depth_limit() {
        let body = "(a / x :ARG0 (b / y :ARG0 (c / z)))";
        let graph = build(body);
        let root = select_root(&graph, body).unwrap();
        assert!(linearize(&graph, root, 3).is_ok());
        assert!(matches!(linearize(&graph, root, 2), Err(Error::DepthExceeded { limit: 2 })));
    }

    #[test]
    fn test_deep_chain_with_unbounded_limit() {
        const DEPTH: usize = 200_000;
        let mut graph = AmrGraph::default();
        graph.nodes = vec![None; DEPTH];
        for i in 0..DEPTH {
            let mut children = Children::new();
            if i + 1 < DEPTH {
                children.push(Child {
                    label: ":ARG0".into(),
                    target: ChildTarget::Nested(NodeId(i + 1)),
                    offset: i,
                });
            }
            graph.insert(Node {
                id: NodeId(i),
                variable: format!("v{i}"),
                concept: "x".into(),
                children,
                polarity: false,
                entity_name: None,
                entity: None,
                source_text: String::new(),
            });
        }

        let path = linearize(&graph, NodeId(0), usize::MAX).unwrap();
        assert_eq!(path.len(), DEPTH);
        assert!(matches!(
            linearize(&graph, NodeId(0), DEPTH - 1),
            Err(Error::DepthExceeded { limit }) if limit == DEPTH - 1
        ));
    }
}
