use anyhow::bail;
use indexmap::IndexMap;

pub const CONTENT_TYPE: &str = "Content-Type";
pub const APPLICATION_JSON: &str = "application/json";

/// Everything the transport needs besides the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub url: String,
    pub headers: IndexMap<String, String>,
}

impl Request {
    /// A request to `url` announcing a JSON body.
    pub fn new(url: impl Into<String>) -> Self {
        let mut headers = IndexMap::new();
        headers.insert(CONTENT_TYPE.to_owned(), APPLICATION_JSON.to_owned());
        Self {
            url: url.into(),
            headers,
        }
    }

    /// Header names are case-insensitive, so an existing header with the same name in any case
    /// is replaced.
    pub fn header(mut self, name: &str, value: &str) -> Self {
        match self
            .headers
            .keys()
            .position(|k| k.eq_ignore_ascii_case(name))
        {
            Some(idx) => {
                self.headers.shift_remove_index(idx);
                self.headers
                    .shift_insert(idx, name.to_owned(), value.to_owned());
            }
            None => {
                self.headers.insert(name.to_owned(), value.to_owned());
            }
        }
        self
    }

    /// Append `?k=v&k2=v2` in the given order. Values are used as given, not percent-encoded.
    pub fn query(mut self, params: &[(String, String)]) -> Self {
        if params.is_empty() {
            return self;
        }
        let query = params
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");
        self.url = format!("{}?{query}", self.url);
        self
    }
}

pub fn build_url(base: &str, endpoint: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    )
}

/// `k=v` as used by `--param`.
pub fn parse_param(arg: &str) -> anyhow::Result<(String, String)> {
    match arg.split_once('=') {
        Some((k, v)) if !k.is_empty() => Ok((k.to_owned(), v.to_owned())),
        _ => bail!("expected `key=value`, found `{arg}`"),
    }
}

/// `Name: value` as used by `--header` and the `headers` config key.
pub fn parse_header(arg: &str) -> anyhow::Result<(String, String)> {
    match arg.split_once(':') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_owned(), value.trim().to_owned()))
        }
        _ => bail!("expected `Name: value`, found `{arg}`"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("https://api.example.com", "save_results"; "plain")]
    #[test_case("https://api.example.com/", "/save_results"; "both slashes")]
    #[test_case("https://api.example.com//", "save_results"; "repeated slashes")]
    fn joins_url(base: &str, endpoint: &str) {
        assert_eq!(
            build_url(base, endpoint),
            "https://api.example.com/save_results"
        );
    }

    #[test]
    fn query_keeps_order() {
        let params = vec![
            ("b".to_owned(), "2".to_owned()),
            ("a".to_owned(), "1".to_owned()),
        ];
        let req = Request::new("https://x.test/r").query(&params);
        assert_eq!(req.url, "https://x.test/r?b=2&a=1");
        assert_eq!(Request::new("u").query(&[]).url, "u");
    }

    #[test]
    fn json_content_type_is_default_and_overridable() {
        let req = Request::new("u");
        assert_eq!(req.headers[CONTENT_TYPE], APPLICATION_JSON);

        let req = req
            .header("content-type", "application/json; charset=utf-8")
            .header("X-Token", "abc");
        assert_eq!(req.headers.len(), 2);
        assert_eq!(
            req.headers["content-type"],
            "application/json; charset=utf-8"
        );
        assert_eq!(req.headers.get_index(1).unwrap().0, "X-Token");
    }

    #[test_case("X-Token: abc", Some(("X-Token", "abc")); "spaced")]
    #[test_case("Accept:*/*", Some(("Accept", "*/*")); "tight")]
    #[test_case("X-Url: http://a", Some(("X-Url", "http://a")); "colon in value")]
    #[test_case(": abc", None; "empty name")]
    #[test_case("nocolon", None; "missing colon")]
    fn parses_headers(arg: &str, expected: Option<(&str, &str)>) {
        let parsed = parse_header(arg).ok();
        assert_eq!(
            parsed.as_ref().map(|(k, v)| (k.as_str(), v.as_str())),
            expected
        );
    }

    #[test]
    fn parses_params() {
        assert_eq!(
            parse_param("page=2").unwrap(),
            ("page".to_owned(), "2".to_owned())
        );
        assert!(parse_param("=2").is_err());
    }
}
