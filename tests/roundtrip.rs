use yarnloom::{Script, collapse, expand, parse_dialect, serialize_dialect};

fn fixture() -> Script {
    // Capture the conversion spans when a test runs with --nocapture.
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    Script::from_json(include_str!("data/simple_dialogue.json")).unwrap()
}

#[test]
fn script_graph_roundtrip_is_lossless() {
    let script = fixture();
    let graph = expand(&script).unwrap();
    assert_eq!(collapse(&graph).unwrap(), script);
}

#[test]
fn script_dialect_roundtrip_is_lossless() {
    let script = fixture();
    let text = serialize_dialect(&script);
    assert_eq!(parse_dialect(&text).unwrap(), script);
}

#[test]
fn full_pipeline_reproduces_the_script() {
    // json -> script -> graph -> script -> yarn -> script
    let script = fixture();
    let collapsed = collapse(&expand(&script).unwrap()).unwrap();
    let reparsed = parse_dialect(&serialize_dialect(&collapsed)).unwrap();
    assert_eq!(reparsed, script);
}

#[test]
fn json_text_roundtrip_is_stable() {
    let script = fixture();
    let json = script.to_json().unwrap();
    let again = Script::from_json(&json).unwrap().to_json().unwrap();
    assert_eq!(json, again);
}
