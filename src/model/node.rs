//! Resolved AMR nodes.

use std::fmt;

use smallvec::SmallVec;

use super::SpanId;

/// Arena index of a node. Equal to the id of the span it was resolved from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl From<SpanId> for NodeId {
    fn from(span: SpanId) -> Self {
        NodeId(span.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Wikipedia link state of a named entity.
///
/// `:wiki -` and a missing `:wiki` are different things: the first says the
/// entity has no article, the second says nobody looked.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum WikiTitle {
    #[default]
    Absent,
    Unlinked,
    Title(String),
}

impl WikiTitle {
    pub fn as_str(&self) -> &str {
        match self {
            WikiTitle::Absent => "",
            WikiTitle::Unlinked => "-",
            WikiTitle::Title(t) => t,
        }
    }
}

/// Named-entity metadata of a node with a `:name` child.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    /// Concept of the entity node, e.g. `city`.
    pub entity_type: String,
    /// Space-joined `:opN` strings of the name node, e.g. `New York`.
    pub name: String,
    pub wiki: WikiTitle,
    /// The `:name` child the name was read from.
    pub name_node: NodeId,
}

/// What an outgoing edge points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChildTarget {
    /// Defining occurrence nested in the parent's span.
    Nested(NodeId),
    /// Bare mention of a variable defined elsewhere. Never owns children.
    Reference(NodeId),
    /// Bare token that is not a variable (`-`, `2012`, `"New"`), verbatim.
    Constant(String),
}

/// One outgoing edge of a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Child {
    /// Role as written, leading colon included (`:ARG0`).
    pub label: String,
    pub target: ChildTarget,
    /// Byte offset of the role token in the block body.
    pub offset: usize,
}

impl Child {
    pub fn node_id(&self) -> Option<NodeId> {
        match self.target {
            ChildTarget::Nested(id) | ChildTarget::Reference(id) => Some(id),
            ChildTarget::Constant(_) => None,
        }
    }

    pub fn is_reference(&self) -> bool {
        matches!(self.target, ChildTarget::Reference(_))
    }
}

pub type Children = SmallVec<[Child; 4]>;

/// The defining occurrence of an AMR variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: NodeId,
    pub variable: String,
    /// Concept after the `/`; `-` for a span without a head.
    pub concept: String,
    /// Outgoing edges in source-text order.
    pub children: Children,
    /// `:polarity -` appears directly in this node's span.
    pub polarity: bool,
    /// Joined quoted `:opN` values, set on name nodes.
    pub entity_name: Option<String>,
    pub entity: Option<Entity>,
    /// Verbatim span text. Debug only, never used as a key.
    pub source_text: String,
}

impl Node {
    pub fn is_entity(&self) -> bool {
        self.entity.is_some()
    }

    pub fn entity_type(&self) -> &str {
        self.entity.as_ref().map_or("", |e| e.entity_type.as_str())
    }

    pub fn wiki_title(&self) -> &str {
        self.entity.as_ref().map_or("", |e| e.wiki.as_str())
    }

    pub fn has_concept(&self) -> bool {
        !self.concept.is_empty()
    }
}
