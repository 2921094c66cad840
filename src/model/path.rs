//! Path — the pre-order linearization of a sentence graph.

use std::fmt;

use super::NodeId;

/// Marker printed for the parent of the root entry.
pub const ROOT_MARKER: &str = "@";

/// Target of a path step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepTarget {
    /// A resolved node, either its defining occurrence or a reference to it.
    Node(NodeId),
    /// A bare constant token.
    Constant(String),
}

/// One `(parent, child, edge_label)` triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathStep {
    /// `None` only for the root entry.
    pub parent: Option<NodeId>,
    pub target: StepTarget,
    /// Role with its leading colon, empty for the root entry.
    pub label: String,
    /// The step walks a reference rather than a definition.
    pub reference: bool,
}

/// Ordered sequence of steps from one walk, root first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Path {
    pub steps: Vec<PathStep>,
}

impl Path {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PathStep> {
        self.steps.iter()
    }

    pub fn push(&mut self, step: PathStep) {
        self.steps.push(step);
    }

    /// The root node, if the walk produced anything.
    pub fn root(&self) -> Option<NodeId> {
        match self.steps.first() {
            Some(PathStep { parent: None, target: StepTarget::Node(id), .. }) => Some(*id),
            _ => None,
        }
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a PathStep;
    type IntoIter = std::slice::Iter<'a, PathStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

impl fmt::Display for StepTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepTarget::Node(id) => write!(f, "{}", id),
            StepTarget::Constant(token) => f.write_str(token),
        }
    }
}
