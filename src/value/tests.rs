use super::*;

#[test]
fn load_preserves_map_order() {
    let docs = parse_yaml_str("zeta: 1\nalpha: two\nmid: 3.5\n").unwrap();
    let [doc] = &docs[..] else {
        panic!("expected a single document");
    };

    let entries = doc.as_map_like().unwrap().string_entries().unwrap();
    let keys: Vec<&str> = entries.iter().map(|(key, _)| key.as_str()).collect();
    assert_eq!(keys, ["zeta", "alpha", "mid"]);
    assert_eq!(entries[0].1, Value::Integer(1));
    assert_eq!(entries[1].1, Value::string("two"));
    assert_eq!(entries[2].1, Value::Real(Rc::new("3.5".to_string())));
}

#[test]
fn load_nested_values() {
    let docs = parse_yaml_str("list:\n  - a\n  - b\nmap:\n  inner: ~\n").unwrap();
    let expected = Value::map([
        ("list", Value::list(["a", "b"])),
        ("map", Value::map([("inner", Value::Null)])),
    ]);
    assert_eq!(docs, vec![expected]);
}

#[test]
fn load_empty_input() {
    let docs = parse_yaml_str("").unwrap();
    assert!(docs.is_empty());
}

#[test]
fn scalar_keys_are_stringified() {
    let map = Value::map([
        (Value::Integer(7), Value::from("seven")),
        (Value::Boolean(true), Value::from("yes")),
        (Value::Null, Value::from("nothing")),
    ]);

    let entries = map.as_map_like().unwrap().string_entries().unwrap();
    let keys: Vec<&str> = entries.iter().map(|(key, _)| key.as_str()).collect();
    assert_eq!(keys, ["7", "true", ""]);
}

#[test]
fn compound_keys_are_rejected() {
    let map = Value::pairs([(Value::list(["a"]), Value::from("x"))]);

    let err = map.as_map_like().unwrap().string_entries().unwrap_err();
    assert_eq!(err, NormalizeError::UnsupportedKeyShape { shape: "list" });
}

#[test]
fn pairs_keep_duplicate_keys() {
    let pairs = Value::pairs([("id", "1"), ("id", "2")]);

    let entries = pairs.as_map_like().unwrap().string_entries().unwrap();
    assert_eq!(
        entries,
        vec![
            ("id".to_string(), Value::from("1")),
            ("id".to_string(), Value::from("2")),
        ]
    );
}

#[test]
fn multimap_joins_repeated_values() {
    let multimap: MultiMap = [("tag", "red"), ("page", "2"), ("tag", "blue")].into_iter().collect();

    assert_eq!(multimap.len(), 2);
    assert_eq!(multimap.get("tag").as_deref(), Some("red,blue"));
    assert_eq!(multimap.get_all("tag"), Some(&["red".to_string(), "blue".to_string()][..]));
    assert_eq!(multimap.get("missing"), None);

    let entries = multimap.string_entries().unwrap();
    assert_eq!(
        entries,
        vec![
            ("tag".to_string(), Value::from("red,blue")),
            ("page".to_string(), Value::from("2")),
        ]
    );
}

#[test]
fn only_associative_shapes_are_map_like() {
    assert!(Value::map([("a", "b")]).as_map_like().is_some());
    assert!(Value::from(MultiMap::new()).as_map_like().is_some());
    assert!(Value::pairs([("a", "b")]).as_map_like().is_some());

    assert!(Value::Null.as_map_like().is_none());
    assert!(Value::from("text").as_map_like().is_none());
    assert!(Value::list(["a"]).as_map_like().is_none());
    assert!(Value::bytes(vec![0u8, 1]).as_map_like().is_none());
}

#[test]
fn scalar_text_of_each_shape() {
    assert_eq!(Value::Null.scalar_text().as_deref(), Some(""));
    assert_eq!(Value::from(42i64).scalar_text().as_deref(), Some("42"));
    assert_eq!(Value::from(false).scalar_text().as_deref(), Some("false"));
    assert_eq!(Value::from("text").scalar_text().as_deref(), Some("text"));
    assert_eq!(Value::bytes(vec![1u8]).scalar_text(), None);
    assert_eq!(Value::list(["a"]).scalar_text(), None);
}
