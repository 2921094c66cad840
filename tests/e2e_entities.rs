//! End-to-end tests for named-entity detection.

use amr_mrp::{Converter, Options, Sentence, WikiTitle};
use pretty_assertions::assert_eq;

fn options() -> Options {
    Options { timestamp: false, entity_metadata: true, ..Options::default() }
}

fn parse(amr: &str) -> Sentence {
    let text = format!("# ::id e.1\n{amr}\n");
    Converter::new(options()).parse(&text).sentences.remove(0)
}

#[test]
fn test_new_york() {
    let amr = r#"(c / city :name (n / name :op1 "New" :op2 "York") :wiki "New_York_City")"#;
    let sentence = parse(amr);
    let c = sentence.graph.node_by_variable("c").unwrap();
    assert!(c.is_entity());
    assert_eq!(c.entity_type(), "city");
    assert_eq!(c.entity.as_ref().unwrap().name, "New York");
    assert_eq!(c.wiki_title(), "New_York_City");

    let rec = Converter::new(options()).convert_one(&format!("# ::id e.1\n{amr}\n")).unwrap();
    let entity = rec.node("c").unwrap().entity.clone().unwrap();
    assert_eq!(entity.name, "New York");
    assert_eq!(entity.wiki, "New_York_City");
    assert_eq!(rec.node("c").unwrap().property("wiki"), Some("New_York_City"));
    assert_eq!(rec.node("n").unwrap().values, vec!["New", "York"]);
}

#[test]
fn test_entity_object_is_opt_in() {
    let text = "# ::id e.1\n(c / city :name (n / name :op1 \"Oslo\") :wiki \"Oslo\")\n";
    let plain = Converter::new(Options { timestamp: false, ..Options::default() }).convert_one(text).unwrap();
    let c = plain.node("c").unwrap();
    assert_eq!(c.entity, None);
    assert_eq!(c.property("wiki"), Some("Oslo"));

    let rich = Converter::new(options()).convert_one(text).unwrap();
    assert_eq!(rich.node("c").unwrap().entity.as_ref().unwrap().name, "Oslo");
}

#[test]
fn test_wiki_dash_means_unlinked() {
    let sentence = parse(r#"(p / person :wiki - :name (n / name :op1 "Ed"))"#);
    let p = sentence.graph.node_by_variable("p").unwrap();
    assert_eq!(p.entity.as_ref().unwrap().wiki, WikiTitle::Unlinked);
    assert_eq!(p.wiki_title(), "-");
}

#[test]
fn test_missing_wiki_is_empty() {
    let sentence = parse(r#"(p / person :name (n / name :op1 "Ed"))"#);
    let p = sentence.graph.node_by_variable("p").unwrap();
    assert_eq!(p.entity.as_ref().unwrap().wiki, WikiTitle::Absent);
    assert_eq!(p.wiki_title(), "");
}

#[test]
fn test_no_name_child_no_entity() {
    let sentence = parse(r#"(c / city :wiki "Oslo" :mod (b / big))"#);
    let c = sentence.graph.node_by_variable("c").unwrap();
    assert!(!c.is_entity());
    assert_eq!(c.wiki_title(), "");
}

#[test]
fn test_nested_entity_inside_event() {
    let amr = r#"(v / visit-01 :ARG0 (p / person :name (n / name :op1 "Ada" :op2 "Lovelace") :wiki -) :ARG1 (c / city :name (n2 / name :op1 "Paris") :wiki "Paris"))"#;
    let sentence = parse(amr);
    let graph = &sentence.graph;

    assert_eq!(graph.node_by_variable("p").unwrap().entity.as_ref().unwrap().name, "Ada Lovelace");
    assert_eq!(graph.node_by_variable("c").unwrap().wiki_title(), "Paris");
    assert!(!graph.node_by_variable("v").unwrap().is_entity());

    let description = graph.describe(graph.node_by_variable("p").unwrap().id).to_string();
    assert!(description.contains("ENTITY NAME: Ada Lovelace"));
    assert!(description.contains("WIKIPEDIA TITLE: -"));
}
