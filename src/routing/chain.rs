//! Map-backed handlers and their builders.
//!
//! # Responsibilities
//! - Look up the exact, percent-decoded request path (query excluded) in a `MappingStore`
//! - Answer hits with `302 Found` and a `Location` header
//! - Hand misses, untouched, to the fallback handler
//! - Build handlers straight from YAML or JSON blobs

use axum::body::Body;
use axum::http::{header, HeaderValue, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use percent_encoding::percent_decode_str;

use crate::mapping::{parse_records, DecodeError, Json, MappingStore, RecordFormat, Yaml};
use crate::routing::handler::{Handler, SharedHandler};

/// Redirects mapped paths and delegates everything else to `fallback`.
#[derive(Debug)]
pub struct MapHandler {
    /// Source name for logging ("map", "yaml", "json").
    label: &'static str,
    store: MappingStore,
    fallback: SharedHandler,
}

impl MapHandler {
    /// Create a handler over an in-memory store.
    pub fn new(store: MappingStore, fallback: SharedHandler) -> Self {
        Self::labeled("map", store, fallback)
    }

    /// Create a handler whose log events name the source `label`.
    pub fn labeled(label: &'static str, store: MappingStore, fallback: SharedHandler) -> Self {
        Self {
            label,
            store,
            fallback,
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn store(&self) -> &MappingStore {
        &self.store
    }
}

impl Handler for MapHandler {
    fn handle(&self, request: Request<Body>) -> Response {
        let raw = request.uri().path();

        // Keys are stored decoded; a path that is not valid UTF-8 once decoded can't match.
        let destination = match percent_decode_str(raw).decode_utf8() {
            Ok(path) => self.store.get(&path),
            Err(e) => {
                tracing::debug!(handler = self.label, path = %raw, error = %e, "Undecodable path");
                None
            }
        };

        match destination {
            Some(destination) => {
                tracing::debug!(
                    handler = self.label,
                    path = %raw,
                    location = %destination,
                    "Redirecting"
                );
                found(destination)
            }
            None => {
                tracing::trace!(handler = self.label, path = %raw, "No mapping, delegating");
                self.fallback.handle(request)
            }
        }
    }
}

/// `302 Found` pointing at `destination`.
fn found(destination: &str) -> Response {
    match HeaderValue::from_str(destination) {
        Ok(location) => (StatusCode::FOUND, [(header::LOCATION, location)]).into_response(),
        Err(e) => {
            tracing::error!(
                location = %destination.escape_debug(),
                error = %e,
                "Mapped URL is not a valid Location header"
            );
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Wrap an in-memory store.
pub fn map_handler(store: MappingStore, fallback: SharedHandler) -> MapHandler {
    MapHandler::new(store, fallback)
}

/// Parse `blob` in format `F` and wrap the resulting store.
pub fn format_handler<F: RecordFormat>(
    blob: &[u8],
    fallback: SharedHandler,
) -> Result<MapHandler, DecodeError> {
    let records = parse_records::<F>(blob)?;
    let store = MappingStore::from_records(records);

    tracing::debug!(format = F::NAME, entries = store.len(), "Redirect list decoded");

    Ok(MapHandler::labeled(F::NAME, store, fallback))
}

/// Build a handler from a YAML list of `path` / `url` records.
pub fn yaml_handler(blob: &[u8], fallback: SharedHandler) -> Result<MapHandler, DecodeError> {
    format_handler::<Yaml>(blob, fallback)
}

/// Build a handler from a JSON array of `path` / `URL` records.
pub fn json_handler(blob: &[u8], fallback: SharedHandler) -> Result<MapHandler, DecodeError> {
    format_handler::<Json>(blob, fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::handler::HelloHandler;
    use axum::http::{HeaderMap, Method, Uri};
    use std::sync::{Arc, Mutex};

    /// Records every request it receives and answers 418.
    #[derive(Debug, Default)]
    struct Recorder {
        seen: Mutex<Vec<(Method, Uri, HeaderMap)>>,
    }

    impl Recorder {
        fn calls(&self) -> Vec<(Method, Uri, HeaderMap)> {
            self.seen.lock().unwrap().clone()
        }
    }

    impl Handler for Recorder {
        fn handle(&self, request: Request<Body>) -> Response {
            self.seen.lock().unwrap().push((
                request.method().clone(),
                request.uri().clone(),
                request.headers().clone(),
            ));
            StatusCode::IM_A_TEAPOT.into_response()
        }
    }

    fn store(pairs: &[(&str, &str)]) -> MappingStore {
        pairs.iter().copied().collect()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn location(response: &Response) -> &str {
        response.headers()[header::LOCATION].to_str().unwrap()
    }

    #[test]
    fn test_hit_redirects_without_fallback() {
        let recorder = Arc::new(Recorder::default());
        let handler = map_handler(
            store(&[("/docs", "https://docs.rs")]),
            recorder.clone(),
        );

        let response = handler.handle(get("/docs"));

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location(&response), "https://docs.rs");
        assert!(recorder.calls().is_empty());
    }

    #[test]
    fn test_miss_delegates_original_request() {
        let recorder = Arc::new(Recorder::default());
        let handler = map_handler(store(&[("/docs", "https://docs.rs")]), recorder.clone());

        let request = Request::builder()
            .method(Method::POST)
            .uri("http://example.com/other?q=1")
            .header("x-trace", "abc")
            .body(Body::from("payload"))
            .unwrap();
        let response = handler.handle(request);

        assert_eq!(response.status(), StatusCode::IM_A_TEAPOT);
        assert!(response.headers().get(header::LOCATION).is_none());

        let calls = recorder.calls();
        assert_eq!(calls.len(), 1);
        let (method, uri, headers) = &calls[0];
        assert_eq!(*method, Method::POST);
        assert_eq!(uri.path(), "/other");
        assert_eq!(uri.query(), Some("q=1"));
        assert_eq!(headers["x-trace"], "abc");
    }

    #[test]
    fn test_query_is_not_part_of_the_key() {
        let handler = map_handler(store(&[("/docs", "https://docs.rs")]), Arc::new(HelloHandler));

        let response = handler.handle(get("/docs?version=latest"));
        assert_eq!(response.status(), StatusCode::FOUND);

        // A key containing a query can never match.
        let handler = map_handler(store(&[("/docs?v=1", "https://docs.rs")]), Arc::new(HelloHandler));
        let response = handler.handle(get("/docs?v=1"));
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_encoded_path_matches_decoded_key() {
        let recorder = Arc::new(Recorder::default());
        let handler = map_handler(
            store(&[("/my page", "https://example.com/space"), ("/café", "https://example.com/cafe")]),
            recorder.clone(),
        );

        let response = handler.handle(get("/my%20page"));
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location(&response), "https://example.com/space");

        let response = handler.handle(get("/caf%C3%A9"));
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location(&response), "https://example.com/cafe");

        assert!(recorder.calls().is_empty());
    }

    #[test]
    fn test_encoded_path_miss_delegates_raw_request() {
        let recorder = Arc::new(Recorder::default());
        let handler = map_handler(store(&[("/my page", "https://example.com")]), recorder.clone());

        let response = handler.handle(get("/my%20pages"));
        assert_eq!(response.status(), StatusCode::IM_A_TEAPOT);

        // The fallback sees the request exactly as it arrived.
        let calls = recorder.calls();
        assert_eq!(calls[0].1.path(), "/my%20pages");
    }

    #[test]
    fn test_undecodable_path_delegates() {
        let recorder = Arc::new(Recorder::default());
        let handler = map_handler(store(&[("/\u{fffd}", "https://example.com")]), recorder.clone());

        // %FF is not valid UTF-8 once decoded.
        let response = handler.handle(get("/%FF"));
        assert_eq!(response.status(), StatusCode::IM_A_TEAPOT);
        assert_eq!(recorder.calls().len(), 1);
    }

    #[test]
    fn test_method_is_not_inspected() {
        let handler = map_handler(store(&[("/go", "https://go.dev")]), Arc::new(HelloHandler));
        for method in [Method::GET, Method::HEAD, Method::POST, Method::DELETE] {
            let request = Request::builder().method(method).uri("/go").body(Body::empty()).unwrap();
            assert_eq!(handler.handle(request).status(), StatusCode::FOUND);
        }
    }

    #[test]
    fn test_empty_store_always_delegates() {
        let recorder = Arc::new(Recorder::default());
        let handler = map_handler(MappingStore::default(), recorder.clone());

        handler.handle(get("/"));
        handler.handle(get("/a"));
        assert_eq!(recorder.calls().len(), 2);
    }

    #[test]
    fn test_unencodable_location_is_server_error() {
        let recorder = Arc::new(Recorder::default());
        let handler = map_handler(store(&[("/bad", "https://example.com/\nx")]), recorder.clone());

        let response = handler.handle(get("/bad"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(recorder.calls().is_empty());
    }

    #[test]
    fn test_outer_handlers_shadow_inner() {
        let hello: SharedHandler = Arc::new(HelloHandler);
        let map: SharedHandler = Arc::new(map_handler(
            store(&[("/shared", "https://map.example"), ("/map-only", "https://map.example/only")]),
            hello,
        ));
        let yaml: SharedHandler = Arc::new(
            yaml_handler(b"- path: /shared\n  url: https://yaml.example\n", map).unwrap(),
        );
        let json = json_handler(br#"[{"path": "/json-only", "URL": "https://json.example"}]"#, yaml)
            .unwrap();

        let response = json.handle(get("/json-only"));
        assert_eq!(location(&response), "https://json.example");

        // Outer handlers shadow inner ones.
        let response = json.handle(get("/shared"));
        assert_eq!(location(&response), "https://yaml.example");

        let response = json.handle(get("/map-only"));
        assert_eq!(location(&response), "https://map.example/only");

        let response = json.handle(get("/nonexistent"));
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_fallback_may_be_shared() {
        let recorder = Arc::new(Recorder::default());
        let shared: SharedHandler = recorder.clone();

        let yaml = yaml_handler(b"- path: /y\n  url: https://y.example\n", shared.clone()).unwrap();
        let json = json_handler(br#"[{"path": "/j", "URL": "https://j.example"}]"#, shared).unwrap();

        assert_eq!(yaml.handle(get("/j")).status(), StatusCode::IM_A_TEAPOT);
        assert_eq!(json.handle(get("/y")).status(), StatusCode::IM_A_TEAPOT);
        assert_eq!(recorder.calls().len(), 2);
    }

    #[test]
    fn test_builders_label_and_fill_store() {
        let json = json_handler(
            br#"[{"path":"/a","url":"X"}, {"path":"/a","url":"Y"}]"#,
            Arc::new(HelloHandler),
        )
        .unwrap();
        assert_eq!(json.label(), "json");
        assert_eq!(json.store().get("/a"), Some("Y"));

        let yaml = yaml_handler(b"[]", Arc::new(HelloHandler)).unwrap();
        assert_eq!(yaml.label(), "yaml");
        assert!(yaml.store().is_empty());
    }

    #[test]
    fn test_malformed_blob_builds_nothing() {
        let result = yaml_handler(b"- path: /a\n  url: \"unterminated\n", Arc::new(HelloHandler));
        assert!(matches!(result, Err(DecodeError::Yaml(_))));

        let result = json_handler(b"[{\"path\": ", Arc::new(HelloHandler));
        assert!(matches!(result, Err(DecodeError::Json(_))));
    }
}
