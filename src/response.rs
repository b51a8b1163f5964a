use tagjson::{JsonValue, Kind};
use thiserror::Error;
use tracing::*;

#[derive(Debug, PartialEq, Eq, Error)]
pub enum ResponseError {
    #[error("response is a JSON {found}, expected an object")]
    NotAnObject { found: Kind },
    #[error("server reported an error: {message}")]
    Remote { message: String },
}

/// A usable response is an object without an `"error"` member.
pub fn validate_response(response: &JsonValue) -> Result<(), ResponseError> {
    if !response.is_object() {
        error!(found = %response.kind(), "response is not a JSON object");
        return Err(ResponseError::NotAnObject {
            found: response.kind(),
        });
    }

    if let Some(e) = response.get("error") {
        let message = match e.as_str() {
            Ok(s) => s.to_owned(),
            Err(_) => tagjson::to_string(e).unwrap_or_else(|_| e.kind().to_string()),
        };
        error!(%message, "response carries an error");
        return Err(ResponseError::Remote { message });
    }

    info!("response validated");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("{}"; "empty object")]
    #[test_case(r#"{"status": "ok", "errors": []}"#; "similar key")]
    fn accepts(src: &str) {
        assert_eq!(validate_response(&tagjson::from_str(src).unwrap()), Ok(()));
    }

    #[test_case("[]", Kind::Array; "array")]
    #[test_case("null", Kind::Null; "null")]
    #[test_case("\"ok\"", Kind::String; "string")]
    fn rejects_non_objects(src: &str, found: Kind) {
        assert_eq!(
            validate_response(&tagjson::from_str(src).unwrap()),
            Err(ResponseError::NotAnObject { found })
        );
    }

    #[test_case(r#"{"error": "bad input"}"#, "bad input"; "string message")]
    #[test_case(r#"{"error": {"code": 4}}"#, r#"{"code": 4}"#; "structured error")]
    #[test_case(r#"{"error": null}"#, "null"; "null error still counts")]
    fn rejects_errors(src: &str, message: &str) {
        assert_eq!(
            validate_response(&tagjson::from_str(src).unwrap()),
            Err(ResponseError::Remote {
                message: message.to_owned()
            })
        );
    }
}
