//! The seam to whatever actually moves bytes. The JSON core never sees URLs or headers; it only
//! produces the request body and consumes the response body.

use std::path::PathBuf;

use anyhow::Context;
use indexmap::IndexMap;
use tagjson::{JsonValue, Serializer};
use thiserror::Error;
use tracing::*;

use crate::request::Request;
use crate::response;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to read replayed response from `{}`", path.display())]
    Replay {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub trait Transport {
    /// Deliver `body` and return the raw response body.
    fn send(
        &self,
        url: &str,
        body: &str,
        headers: &IndexMap<String, String>,
    ) -> Result<String, TransportError>;
}

/// Offline transport: logs the outgoing request and answers with the contents of a file
/// recorded earlier.
#[derive(Debug)]
pub struct ReplayTransport {
    response: PathBuf,
}

impl ReplayTransport {
    pub fn new(response: impl Into<PathBuf>) -> Self {
        Self {
            response: response.into(),
        }
    }
}

impl Transport for ReplayTransport {
    fn send(
        &self,
        url: &str,
        body: &str,
        headers: &IndexMap<String, String>,
    ) -> Result<String, TransportError> {
        info!(url, bytes = body.len(), "sending request");
        debug!(?headers, body);
        std::fs::read_to_string(&self.response).map_err(|source| TransportError::Replay {
            path: self.response.clone(),
            source,
        })
    }
}

/// Serialize `payload`, hand it to `transport`, then parse and validate what comes back.
#[instrument(skip_all, fields(url = %request.url))]
pub fn exchange(
    transport: &dyn Transport,
    request: &Request,
    payload: &JsonValue,
    max_depth: usize,
) -> anyhow::Result<JsonValue> {
    let body = Serializer::new()
        .max_depth(max_depth)
        .to_string(payload)
        .context("failed to serialize request payload")?;

    let raw = transport
        .send(&request.url, &body, &request.headers)
        .with_context(|| format!("request to `{}` failed", request.url))?;

    let parsed = tagjson::from_str_with_limit(&raw, max_depth);
    let response = match parsed {
        Ok(response) => response,
        Err(e) => {
            error!(%raw, "response body is not valid JSON");
            return Err(e).context("failed to parse response body");
        }
    };

    response::validate_response(&response)?;
    Ok(response)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::response::ResponseError;

    /// Records what it was asked to send and answers with a fixed body.
    struct Canned {
        reply: Result<&'static str, ()>,
        seen: RefCell<Option<(String, String, IndexMap<String, String>)>>,
    }

    impl Canned {
        fn replying(reply: &'static str) -> Self {
            Self {
                reply: Ok(reply),
                seen: RefCell::new(None),
            }
        }
    }

    impl Transport for Canned {
        fn send(
            &self,
            url: &str,
            body: &str,
            headers: &IndexMap<String, String>,
        ) -> Result<String, TransportError> {
            *self.seen.borrow_mut() = Some((url.to_owned(), body.to_owned(), headers.clone()));
            match self.reply {
                Ok(reply) => Ok(reply.to_owned()),
                Err(()) => Err(TransportError::Replay {
                    path: PathBuf::from("unreachable"),
                    source: std::io::Error::from(std::io::ErrorKind::ConnectionRefused),
                }),
            }
        }
    }

    fn payload() -> JsonValue {
        JsonValue::Null
            .with_field("slope", 1.5)
            .and_then(|v| v.with_field("intercept", 0.5))
            .unwrap()
    }

    #[test]
    fn sends_serialized_payload_and_returns_parsed_response() {
        let transport = Canned::replying(r#"{"status": "saved", "id": 7}"#);
        let request = Request::new("https://api.example.com/save_results");

        let response = exchange(&transport, &request, &payload(), 1000).unwrap();
        assert_eq!(response.get("id"), Some(&JsonValue::Int(7)));

        let (url, body, headers) = transport.seen.into_inner().unwrap();
        assert_eq!(url, "https://api.example.com/save_results");
        assert_eq!(body, r#"{"slope": 1.5, "intercept": 0.5}"#);
        assert_eq!(headers["Content-Type"], "application/json");
    }

    #[test]
    fn remote_error_is_surfaced() {
        let transport = Canned::replying(r#"{"error": "quota exceeded"}"#);
        let err = exchange(&transport, &Request::new("u"), &payload(), 1000).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ResponseError>(),
            Some(&ResponseError::Remote {
                message: "quota exceeded".to_owned()
            })
        );
    }

    #[test]
    fn malformed_response_keeps_parse_error() {
        let transport = Canned::replying("{\"a\": }");
        let err = exchange(&transport, &Request::new("u"), &payload(), 1000).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<tagjson::Error>(),
            Some(tagjson::Error::MalformedJson { .. })
        ));
    }

    #[test]
    fn transport_failure_is_reported() {
        let transport = Canned {
            reply: Err(()),
            seen: RefCell::new(None),
        };
        let err = exchange(&transport, &Request::new("u"), &payload(), 1000).unwrap_err();
        assert!(err.downcast_ref::<TransportError>().is_some());
    }

    #[test]
    fn payload_deeper_than_limit_is_never_sent() {
        let transport = Canned::replying("{}");
        let deep = JsonValue::Null
            .with_field("a", JsonValue::Null.with_field("b", 1).unwrap())
            .unwrap();
        let err = exchange(&transport, &Request::new("u"), &deep, 1).unwrap_err();
        assert_eq!(
            err.downcast_ref::<tagjson::Error>(),
            Some(&tagjson::Error::DepthExceeded { limit: 1 })
        );
        assert!(transport.seen.borrow().is_none());
    }

    #[test]
    fn replay_transport_reads_missing_file_as_error() {
        let transport = ReplayTransport::new("/nonexistent/resultpost/response.json");
        let err = transport
            .send("u", "{}", &IndexMap::new())
            .unwrap_err();
        assert!(matches!(err, TransportError::Replay { .. }));
    }
}
