use proptest::prelude::*;
use tagjson::{from_str, to_string, to_string_pretty, JsonValue, Map};

fn arb_json() -> impl Strategy<Value = JsonValue> {
    let leaf = prop_oneof![
        Just(JsonValue::Null),
        any::<bool>().prop_map(JsonValue::Bool),
        any::<i64>().prop_map(JsonValue::Int),
        // NaN and infinities have no JSON spelling.
        any::<f64>()
            .prop_filter("finite", |f| f.is_finite())
            .prop_map(JsonValue::Float),
        any::<String>().prop_map(JsonValue::String),
    ];
    leaf.prop_recursive(6, 64, 8, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..8).prop_map(JsonValue::Array),
            prop::collection::vec((any::<String>(), inner), 0..8)
                .prop_map(|entries| JsonValue::Object(entries.into_iter().collect::<Map>())),
        ]
    })
}

proptest! {
    #[test]
    fn parse_inverts_serialize(value in arb_json()) {
        let text = to_string(&value).unwrap();
        prop_assert_eq!(from_str(&text).unwrap(), value);
    }

    #[test]
    fn parse_inverts_pretty_serialize(value in arb_json()) {
        let text = to_string_pretty(&value, 4).unwrap();
        prop_assert_eq!(from_str(&text).unwrap(), value);
    }

    #[test]
    fn serialized_text_is_valid_for_serde_json(value in arb_json()) {
        let text = to_string(&value).unwrap();
        prop_assert!(serde_json::from_str::<serde_json::Value>(&text).is_ok());
    }
}

#[test]
fn regression_payload_round_trips() {
    let payload = JsonValue::Null
        .with_field("slope", 1.5)
        .unwrap()
        .with_field("intercept", 0.5)
        .unwrap();
    let parsed = from_str(&to_string(&payload).unwrap()).unwrap();
    let obj = parsed.as_object().unwrap();
    assert_eq!(obj.len(), 2);
    assert_eq!(obj["slope"].as_float(), Ok(1.5));
    assert_eq!(obj["intercept"].as_float(), Ok(0.5));
}

#[test]
fn array_text_round_trips() {
    let parsed = from_str("[1, 2, 3]").unwrap();
    assert_eq!(
        parsed,
        JsonValue::Array(vec![JsonValue::Int(1), JsonValue::Int(2), JsonValue::Int(3)])
    );
    assert_eq!(from_str(&to_string(&parsed).unwrap()).unwrap(), parsed);
}
