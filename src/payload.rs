use anyhow::{bail, Context};
use tagjson::JsonValue;

/// One `key=value` command line field.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub key: String,
    pub value: JsonValue,
}

/// The value half is read as JSON when it parses, so `n=3` is a number and `tags=["a"]` is an
/// array. Anything else, e.g. `name=alice`, is kept as a plain string.
pub fn parse_field(arg: &str) -> anyhow::Result<Field> {
    let Some((key, raw)) = arg.split_once('=') else {
        bail!("expected `key=value`, found `{arg}`");
    };
    if key.is_empty() {
        bail!("field `{arg}` has an empty key");
    }
    let value = tagjson::from_str(raw).unwrap_or_else(|_| JsonValue::from(raw));
    Ok(Field {
        key: key.to_owned(),
        value,
    })
}

/// Fold fields into an object. Later fields overwrite earlier ones with the same key.
pub fn build_payload(fields: &[Field]) -> anyhow::Result<JsonValue> {
    fields
        .iter()
        .try_fold(JsonValue::object(), |payload, field| {
            payload
                .with_field(field.key.as_str(), field.value.clone())
                .with_context(|| format!("failed to set payload field `{}`", field.key))
        })
}
