//! MRP export — serialize a sentence graph as an interchange record.
//!
//! ```text
//! Sentence → to_record() → GraphRecord
//!   → write_json_lines()  one compact record per line (file output)
//!   → write_pretty()      indented, keys sorted (terminal output)
//! ```
//!
//! Concept nodes become `nodes[]`; bare constants hanging off a node are
//! folded into its parallel `properties`/`values` arrays instead of becoming
//! nodes of their own.

use std::io::Write;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{Options, TopsPolicy};
use crate::model::*;
use crate::reader::BlockFailure;
use crate::Result;

/// Timestamp layout of the `time` field.
pub const TIME_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// One MRP graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphRecord {
    pub id: String,
    pub flavor: u8,
    pub framework: String,
    pub version: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    pub input: String,
    pub tops: Vec<usize>,
    pub nodes: Vec<RecordNode>,
    pub edges: Vec<RecordEdge>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordNode {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<RecordEntity>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordEntity {
    #[serde(rename = "type")]
    pub entity_type: String,
    pub name: String,
    pub wiki: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordEdge {
    pub source: String,
    pub target: String,
    pub label: String,
}

impl GraphRecord {
    pub fn node(&self, id: &str) -> Option<&RecordNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn edges_labelled<'a>(&'a self, label: &'a str) -> impl Iterator<Item = &'a RecordEdge> + 'a {
        self.edges.iter().filter(move |e| e.label == label)
    }
}

impl RecordNode {
    /// Value of the first property named `property`.
    pub fn property(&self, property: &str) -> Option<&str> {
        self.properties
            .iter()
            .position(|p| p == property)
            .and_then(|i| self.values.get(i))
            .map(String::as_str)
    }
}

/// Records and failures of a whole conversion run.
#[derive(Debug, Default)]
pub struct ConversionReport {
    pub records: Vec<GraphRecord>,
    pub failures: Vec<BlockFailure>,
}

/// Map a parsed sentence to its record.
pub fn to_record(sentence: &Sentence, options: &Options) -> GraphRecord {
    let graph = &sentence.graph;
    let nodes = record_nodes(graph, options);
    let edges = record_edges(graph);

    let tops = match options.tops {
        TopsPolicy::Placeholder => vec![0],
        TopsPolicy::Root => graph
            .root()
            .and_then(|root| nodes.iter().position(|n| n.id == root.variable))
            .into_iter()
            .collect(),
    };
    let time = options
        .timestamp
        .then(|| chrono::Local::now().format(TIME_FORMAT).to_string());

    debug!(id = %sentence.id, nodes = nodes.len(), edges = edges.len(), "emitted record");

    GraphRecord {
        id: sentence.id.clone(),
        flavor: options.flavor,
        framework: options.framework.clone(),
        version: options.version,
        time,
        input: sentence.text.clone(),
        tops,
        nodes,
        edges,
    }
}

/// One record node per defined variable with a concept, in table order.
fn record_nodes(graph: &AmrGraph, options: &Options) -> Vec<RecordNode> {
    let mut nodes = Vec::new();

    for node in graph.defined_nodes().filter(|n| n.has_concept()) {
        let mut properties = Vec::new();
        let mut values = Vec::new();

        for child in &node.children {
            let value = match &child.target {
                ChildTarget::Constant(token) => token.trim_matches('"').to_string(),
                ChildTarget::Nested(id) | ChildTarget::Reference(id) => match graph.node(*id) {
                    Some(target) if !target.has_concept() => target.variable.clone(),
                    _ => continue,
                },
            };
            properties.push(strip_colon(&child.label).to_string());
            values.push(value);
        }

        let entity = match &node.entity {
            Some(e) if options.entity_metadata => Some(RecordEntity {
                entity_type: e.entity_type.clone(),
                name: e.name.clone(),
                wiki: e.wiki.as_str().to_string(),
            }),
            _ => None,
        };

        nodes.push(RecordNode {
            id: node.variable.clone(),
            label: node.concept.clone(),
            properties,
            values,
            entity,
        });
    }

    nodes
}

/// One edge per labelled path step that lands on a concept node.
fn record_edges(graph: &AmrGraph) -> Vec<RecordEdge> {
    graph
        .path()
        .iter()
        .filter(|step| !step.label.is_empty())
        .filter_map(|step| {
            let parent = graph.node(step.parent?)?;
            let StepTarget::Node(target) = &step.target else { return None };
            let target = graph.node(*target).filter(|t| t.has_concept())?;
            Some(RecordEdge {
                source: parent.variable.clone(),
                target: target.variable.clone(),
                label: strip_colon(&step.label).to_string(),
            })
        })
        .collect()
}

fn strip_colon(label: &str) -> &str {
    label.strip_prefix(':').unwrap_or(label)
}

/// Write records as JSON lines.
pub fn write_json_lines<'a>(
    records: impl IntoIterator<Item = &'a GraphRecord>,
    writer: &mut dyn Write,
) -> Result<()> {
    for record in records {
        serde_json::to_writer(&mut *writer, record)?;
        writeln!(writer)?;
    }
    Ok(())
}

/// Write one record as indented JSON with sorted keys.
pub fn write_pretty(record: &GraphRecord, writer: &mut dyn Write) -> Result<()> {
    // Going through `Value` sorts object keys.
    let value = serde_json::to_value(record)?;
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut *writer, formatter);
    value.serialize(&mut ser)?;
    writeln!(writer)?;
    Ok(())
}
