//! End-to-end behaviour of the public API on small documents.

use nebula_json::prelude::*;
use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};
use serde_json::json;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

#[fixture]
fn doc() -> Value {
    r#"{
        "a": [1, 2, 3],
        "user": {"name": "ann", "age": 41, "admin": "yes"},
        "flag": true,
        "nothing": null
    }"#
    .parse()
    .unwrap()
}

fn error_kind(v: &Value) -> Option<ErrorKind> {
    v.error().map(ValueError::kind)
}

// ===== LOOKUPS =====

#[rstest]
fn index_lookup_and_out_of_bounds(doc: Value) {
    assert_eq!(doc.get("a").get(1).i64_value(), 2);

    let out = doc.get("a").get(5);
    assert!(out.is_null());
    assert_eq!(error_kind(&out), Some(ErrorKind::IndexOutOfBounds));
    assert!(out.exists());
}

#[rstest]
fn missing_key_and_wrong_type(doc: Value) {
    let missing = doc.get("b");
    assert_eq!(error_kind(&missing), Some(ErrorKind::NotExist));
    assert!(!missing.exists());

    let wrong = doc.get("a").get("x");
    assert_eq!(error_kind(&wrong), Some(ErrorKind::WrongType));
}

#[rstest]
fn document_null_is_not_a_failed_lookup(doc: Value) {
    let null = doc.get("nothing");
    assert!(null.is_null());
    assert!(null.exists());
    assert!(null.error().is_none());
}

#[rstest]
#[case(vec![PathSegment::from("a"), PathSegment::Index(2)])]
#[case(vec![PathSegment::from("user"), PathSegment::from("name")])]
#[case(vec![PathSegment::from("user"), PathSegment::from("missing"), PathSegment::Index(0)])]
#[case(vec![PathSegment::from("flag"), PathSegment::Index(0)])]
fn path_equals_chained_lookups(doc: Value, #[case] path: Vec<PathSegment>) {
    let folded = doc.get_path(&path);
    let chained = path.iter().fold(doc.clone(), |v, s| v.get(s));
    assert_eq!(folded, chained);
    assert_eq!(folded.error(), chained.error());
}

#[rstest]
fn textual_paths(doc: Value) {
    assert_eq!(doc.pointer("user.name").as_str(), Some("ann"));
    assert_eq!(doc.pointer("a[0]").as_u8(), Some(1));
    assert_eq!(error_kind(&doc.pointer("a[x]")), Some(ErrorKind::InvalidPath));
}

// ===== ACCESSORS =====

#[rstest]
#[case(Value::from("42"), 42)]
#[case(Value::from("abc"), 0)]
#[case(Value::from(" -8 "), -8)]
#[case(Value::from(true), 1)]
#[case(Value::null(), 0)]
fn number_coercion(#[case] v: Value, #[case] expected: i64) {
    assert_eq!(v.number_value().to_i64(), expected);
}

#[rstest]
fn coercing_accessors_never_fail(doc: Value) {
    let missing = doc.pointer("user.email");
    assert_eq!(missing.string_value(), "");
    assert_eq!(missing.i32_value(), 0);
    assert!(!missing.bool_value());
    assert!(missing.array_value().is_empty());
    assert!(missing.object_value().is_empty());
    assert!(doc.pointer("user.admin").bool_value());
}

#[test]
fn bool_and_number_are_distinct() {
    let t = Value::from(true);
    let one = Value::from(1);
    assert_eq!(t.kind(), ValueKind::Bool);
    assert_eq!(one.kind(), ValueKind::Number);
    assert_ne!(t, one);
    assert_eq!(t.as_i64(), Some(1));
    assert_eq!(one.as_bool(), None);
}

// ===== WRITES =====

#[test]
fn set_path_creates_nested_objects() {
    init_tracing();
    let mut v: Value = "{}".parse().unwrap();
    v.set_path(["x", "y"], 5);
    assert_eq!(v.raw(), json!({"x": {"y": 5}}));
}

#[rstest]
fn error_bearing_writes_are_dropped(doc: Value) {
    init_tracing();
    let mut v = doc.clone();
    let failed = v.get("missing");

    v.set("user", failed.clone());
    v.set_path(["user", "name"], failed.clone());
    v.set_pointer("a[0]", failed);

    assert_eq!(v, doc);
}

#[rstest]
fn typed_setters_reclassify(doc: Value) {
    let mut v = doc.get("user");
    v.set_string_value("plain");
    assert_eq!(v.kind(), ValueKind::String);
    assert!(v.is_empty());

    v.set_raw(json!({"k": [1]}));
    assert_eq!(v.kind(), ValueKind::Object);
    assert_eq!(doc.pointer("user.name").as_str(), Some("ann"));
}

// ===== ITERATION =====

#[rstest]
fn iteration_shapes(doc: Value) {
    let keys: Vec<String> = doc.get("a").iter().map(|(k, _)| k).collect();
    assert_eq!(keys, ["0", "1", "2"]);
    assert_eq!(doc.iter().count(), doc.len());
    assert_eq!(doc.get("flag").iter().count(), 0);
}

// ===== RENDERING =====

#[rstest]
#[case(Value::from(true), "true")]
#[case(Value::null(), "null")]
#[case(Value::from("hi"), "hi")]
#[case(Value::from(json!([1, "a"])), r#"[1,"a"]"#)]
fn raw_strings(#[case] v: Value, #[case] expected: &str) {
    let text = v.to_raw_string(TextEncoding::Utf8, &WriteOptions::default());
    assert_eq!(text.as_deref(), Some(expected));
}

#[rstest]
fn raw_data_round_trip(doc: Value) {
    let bytes = doc.to_raw_data(&WriteOptions::default()).unwrap();
    let back = Value::from_slice(&bytes, &ReadOptions::default()).unwrap();
    assert_eq!(back, doc);
    assert_eq!(back.keys().collect::<Vec<_>>(), doc.keys().collect::<Vec<_>>());
}

#[test]
fn unsupported_input_is_not_encodable() {
    init_tracing();
    let mut map = std::collections::HashMap::new();
    map.insert((1, 2), "pair key");

    let v = Value::from_serialize(&map);
    assert_eq!(v.kind(), ValueKind::Unsupported);
    assert_eq!(error_kind(&v), Some(ErrorKind::UnsupportedType));

    let err = v.to_raw_data(&WriteOptions::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidJson);
    assert_eq!(v.to_raw_string(TextEncoding::Utf8, &WriteOptions::default()), None);
}

// ===== MERGE =====

#[rstest]
fn merge_patch_into_document(doc: Value) {
    let patch: Value = r#"{"user": {"age": 42, "city": "Oslo"}, "a": [4]}"#.parse().unwrap();
    let merged = doc.merged(&patch).unwrap();

    assert_eq!(merged.pointer("user.age").i64_value(), 42);
    assert_eq!(merged.pointer("user.name").as_str(), Some("ann"));
    assert_eq!(merged.get("a").len(), 4);
    assert!(doc.merged(&Value::from(1)).is_err());
}
