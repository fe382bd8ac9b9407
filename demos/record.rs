use typedrecord::{Key, KeyKind, RawRecord, Symbol, TypedValue, ValueKind};

fn main() {
    let mut scores: RawRecord = RawRecord::new();
    scores.insert(Key::from(0), TypedValue::from_value(12u32));

    let mut scores =
        typedrecord::validated_record(scores, KeyKind::Numeric, ValueKind::of::<u32>(), true)
            .expect("seed entries are valid");
    scores.insert(1, 30u32).unwrap();
    assert_eq!(scores.get_as::<u32>(1).unwrap(), Some(&30));
    assert!(scores.insert("01", 5u32).is_err());
    assert!(scores.insert(2, "thirty").is_err());

    let mut tags = typedrecord::record(
        RawRecord::new(),
        KeyKind::Symbolic,
        ValueKind::typed_guard::<String>(|s| !s.is_empty()),
    );
    let owner = Symbol::new("owner");
    tags.insert(&owner, String::from("ops")).unwrap();
    assert!(tags.insert(&owner, String::new()).is_err());
    assert_eq!(tags.get_as::<String>(&owner).unwrap().map(String::as_str), Some("ops"));

    println!("scores: {scores:?}");
    println!("tags: {tags:?}");
}
