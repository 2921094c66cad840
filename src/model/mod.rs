//! # Sentence Graph Model
//!
//! Plain data produced by the AMR pipeline and consumed by the exporter.
//! No I/O, no parsing logic.

pub mod span;
pub mod node;
pub mod path;
pub mod graph;
pub mod sentence;

pub use span::{BracketSpan, SpanId};
pub use node::{Child, ChildTarget, Children, Entity, Node, NodeId, WikiTitle};
pub use path::{Path, PathStep, StepTarget, ROOT_MARKER};
pub use graph::{AmrGraph, NodeDescription, VariableTable};
pub use sentence::Sentence;
