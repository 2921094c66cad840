//! End-to-end conversion of single AMR blocks.
//!
//! Each test exercises: blocks -> spans -> nodes -> path -> record.

use amr_mrp::{Converter, GraphRecord, Options, RecordEdge};
use pretty_assertions::assert_eq;

fn converter() -> Converter {
    Converter::new(Options { timestamp: false, ..Options::default() })
}

fn convert(amr: &str) -> GraphRecord {
    let text = format!("# ::id test.1\n# ::snt A test sentence.\n{amr}\n");
    converter().convert_one(&text).unwrap()
}

fn edge(source: &str, target: &str, label: &str) -> RecordEdge {
    RecordEdge { source: source.into(), target: target.into(), label: label.into() }
}

// ============================================================================
// 1. Negated purchase with two arguments
// ============================================================================

#[test]
fn test_buy_with_polarity() {
    let rec = convert("(b / buy-01 :ARG0 (p / person) :ARG1 (c / car) :polarity -)");

    let b = rec.node("b").unwrap();
    assert_eq!(b.label, "buy-01");
    assert_eq!(b.property("polarity"), Some("-"));
    assert_eq!(rec.node("p").unwrap().label, "person");
    assert_eq!(rec.node("c").unwrap().label, "car");

    assert_eq!(rec.edges, vec![edge("b", "p", "ARG0"), edge("b", "c", "ARG1")]);
}

// ============================================================================
// 2. Record header
// ============================================================================

#[test]
fn test_record_header() {
    let rec = convert("(b / buy-01 :ARG0 (p / person))");
    assert_eq!(rec.id, "test.1");
    assert_eq!(rec.input, "A test sentence.");
    assert_eq!(rec.framework, "amr");
    assert_eq!(rec.flavor, 2);
    assert_eq!(rec.version, 0.9);
    assert_eq!(rec.time, None);
    // root `b` is emitted after its leaf child
    assert_eq!(rec.tops, vec![1]);
}

// ============================================================================
// 3. Multi-line AMR as found in release files
// ============================================================================

#[test]
fn test_multiline_body() {
    let rec = convert(
        "(s / say-01\n      :ARG0 (g / government-organization\n            :ARG0-of (g2 / govern-01))\n      :ARG1 (r / recommend-01 :mode imperative))",
    );
    let ids: Vec<&str> = rec.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["g2", "r", "g", "s"]);
    assert_eq!(rec.node("r").unwrap().property("mode"), Some("imperative"));
    assert_eq!(
        rec.edges,
        vec![edge("s", "g", "ARG0"), edge("g", "g2", "ARG0-of"), edge("s", "r", "ARG1")]
    );
}

// ============================================================================
// 4. Date entity: every attribute is a constant
// ============================================================================

#[test]
fn test_date_entity_properties() {
    let rec = convert("(d / date-entity :year 2012 :month 5 :day 14)");
    let d = rec.node("d").unwrap();
    assert_eq!(d.properties, vec!["year", "month", "day"]);
    assert_eq!(d.values, vec!["2012", "5", "14"]);
    assert!(rec.edges.is_empty());
}

// ============================================================================
// 5. Constants next to nested children keep source order
// ============================================================================

#[test]
fn test_mixed_children_order() {
    let rec = convert("(h / have-quant-91 :quant 3 :ARG1 (c / cat) :degree more)");
    let h = rec.node("h").unwrap();
    assert_eq!(h.properties, vec!["quant", "degree"]);
    assert_eq!(h.values, vec!["3", "more"]);
    assert_eq!(rec.edges, vec![edge("h", "c", "ARG1")]);
}

// ============================================================================
// 6. Same text twice, two different nodes
// ============================================================================

#[test]
fn test_identical_subtrees_do_not_collide() {
    let rec = convert("(a / and :op1 (t / thing) :op2 (t2 / thing))");
    assert_eq!(rec.nodes.len(), 3);
    assert_eq!(rec.edges, vec![edge("a", "t", "op1"), edge("a", "t2", "op2")]);
}

// ============================================================================
// 7. Re-emitting the same sentence is order-stable
// ============================================================================

#[test]
fn test_reemission_is_identical() {
    let text = "# ::id x\n(w / want-01 :ARG0 (b / boy) :ARG1 (g / go-01 :ARG0 b :time (t / today)))\n";
    let converter = converter();
    let report = converter.parse(text);
    let sentence = &report.sentences[0];

    let first = amr_mrp::export::to_record(sentence, converter.options());
    let second = amr_mrp::export::to_record(sentence, converter.options());
    assert_eq!(
        serde_json::to_string(&first.nodes).unwrap(),
        serde_json::to_string(&second.nodes).unwrap()
    );
    assert_eq!(
        serde_json::to_string(&first.edges).unwrap(),
        serde_json::to_string(&second.edges).unwrap()
    );
}
