//! Sentence graph — node arena, variable table and path of one AMR block.

use std::fmt;

use hashbrown::HashMap;

use super::{BracketSpan, ChildTarget, Node, NodeId, Path, PathStep, ROOT_MARKER, SpanId, StepTarget};

// ============================================================================
// VariableTable
// ============================================================================

/// Variable → defining node.
///
/// Re-registering a variable replaces its node but keeps the position of the
/// first registration, so iteration order is first-insertion order.
#[derive(Debug, Clone, Default)]
pub struct VariableTable {
    order: Vec<String>,
    index: HashMap<String, NodeId>,
}

impl VariableTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `variable`, returning the node it previously pointed to.
    pub fn insert(&mut self, variable: impl Into<String>, id: NodeId) -> Option<NodeId> {
        let variable = variable.into();
        match self.index.insert(variable.clone(), id) {
            Some(previous) => Some(previous),
            None => {
                self.order.push(variable);
                None
            }
        }
    }

    pub fn get(&self, variable: &str) -> Option<NodeId> {
        self.index.get(variable).copied()
    }

    pub fn contains(&self, variable: &str) -> bool {
        self.index.contains_key(variable)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Entries in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, NodeId)> + '_ {
        self.order.iter().map(|v| (v.as_str(), self.index[v.as_str()]))
    }
}

// ============================================================================
// AmrGraph
// ============================================================================

/// Everything resolved from one AMR body.
#[derive(Debug, Clone, Default)]
pub struct AmrGraph {
    pub(crate) spans: Vec<BracketSpan>,
    /// Arena indexed by span id; `None` for dropped spans.
    pub(crate) nodes: Vec<Option<Node>>,
    pub(crate) variables: VariableTable,
    pub(crate) root: Option<NodeId>,
    pub(crate) path: Path,
}

impl AmrGraph {
    pub(crate) fn with_spans(spans: Vec<BracketSpan>) -> Self {
        let nodes = vec![None; spans.len()];
        Self { spans, nodes, ..Self::default() }
    }

    /// Store a resolved node in its arena slot and register its variable.
    pub(crate) fn insert(&mut self, node: Node) {
        let slot = node.id.0;
        self.variables.insert(node.variable.clone(), node.id);
        self.nodes[slot] = Some(node);
    }

    pub fn spans(&self) -> &[BracketSpan] {
        &self.spans
    }

    pub fn span(&self, id: SpanId) -> Option<&BracketSpan> {
        self.spans.get(id.0)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    /// All resolved nodes in span discovery order, shadowed definitions included.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.iter().flatten()
    }

    /// The defining node currently registered for `variable`.
    pub fn node_by_variable(&self, variable: &str) -> Option<&Node> {
        self.variables.get(variable).and_then(|id| self.node(id))
    }

    /// Defining nodes in variable-table order, one per variable.
    pub fn defined_nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.variables.iter().filter_map(|(_, id)| self.node(id))
    }

    pub fn variables(&self) -> &VariableTable {
        &self.variables
    }

    pub fn root(&self) -> Option<&Node> {
        self.root.and_then(|id| self.node(id))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Variable of a node, or `""` for an unknown id.
    pub fn variable_of(&self, id: NodeId) -> &str {
        self.node(id).map_or("", |n| n.variable.as_str())
    }

    /// The path as printable `(parent, child, label)` string triples.
    pub fn triples(&self) -> Vec<(String, String, String)> {
        self.path.iter().map(|step| self.triple(step)).collect()
    }

    fn triple(&self, step: &PathStep) -> (String, String, String) {
        let parent = match step.parent {
            Some(id) => self.variable_of(id).to_string(),
            None => ROOT_MARKER.to_string(),
        };
        let child = match &step.target {
            StepTarget::Node(id) => self.variable_of(*id).to_string(),
            StepTarget::Constant(token) => token.clone(),
        };
        (parent, child, step.label.clone())
    }

    /// Human-readable description of one node.
    pub fn describe(&self, id: NodeId) -> NodeDescription<'_> {
        NodeDescription { graph: self, id }
    }
}

// ============================================================================
// Node descriptions
// ============================================================================

/// `Display` adapter printing a node with its outgoing links.
pub struct NodeDescription<'g> {
    graph: &'g AmrGraph,
    id: NodeId,
}

impl fmt::Display for NodeDescription<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(node) = self.graph.node(self.id) else {
            return writeln!(f, "NODE {}: <dropped>", self.id);
        };

        writeln!(f, "NODE NAME: {} / {}", node.variable, node.concept)?;
        writeln!(f, "POLARITY: {}", node.polarity)?;
        if let Some(entity) = &node.entity {
            writeln!(f, "ENTITY TYPE: {}", entity.entity_type)?;
            writeln!(f, "ENTITY NAME: {}", entity.name)?;
            writeln!(f, "WIKIPEDIA TITLE: {}", entity.wiki.as_str())?;
        }
        writeln!(f, "LINK TO:")?;
        for child in &node.children {
            match &child.target {
                ChildTarget::Nested(id) | ChildTarget::Reference(id) => {
                    let target = self.graph.node(*id);
                    let variable = target.map_or("?", |n| n.variable.as_str());
                    let concept = target.map_or("?", |n| n.concept.as_str());
                    writeln!(f, "\t({}) -> {} / {}", child.label, variable, concept)?;
                }
                ChildTarget::Constant(token) => {
                    writeln!(f, "\t({}) -> {}", child.label, token)?;
                }
            }
        }
        Ok(())
    }
}
