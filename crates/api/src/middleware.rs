use axum::{
    extract::State,
    http::{HeaderMap, HeaderValue, Method, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

const ALLOWED_METHODS: &str = "GET, POST, PUT, DELETE";
const DEFAULT_ALLOWED_HEADERS: &str = "content-type";

/// Cross-origin policy: one allowed origin, credentials permitted.
#[derive(Clone)]
pub struct CorsState {
    pub allowed_origin: HeaderValue,
}

impl CorsState {
    pub fn new(allowed_origin: HeaderValue) -> Self {
        Self { allowed_origin }
    }

    fn is_allowed(&self, headers: &HeaderMap) -> bool {
        headers
            .get(header::ORIGIN)
            .is_some_and(|origin| *origin == self.allowed_origin)
    }
}

/// Answers preflight requests and decorates every other response with the
/// CORS headers when the caller's `Origin` matches.
///
/// Requests from other origins are still served, just without the headers,
/// which leaves enforcement to the browser.
pub async fn cors_middleware(
    State(state): State<CorsState>,
    req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let allowed = state.is_allowed(req.headers());

    if is_preflight(&req) {
        let mut res = StatusCode::NO_CONTENT.into_response();
        if allowed {
            let requested_headers = req
                .headers()
                .get(header::ACCESS_CONTROL_REQUEST_HEADERS)
                .cloned()
                .unwrap_or_else(|| HeaderValue::from_static(DEFAULT_ALLOWED_HEADERS));

            let headers = res.headers_mut();
            insert_allow_origin(headers, &state);
            headers.insert(
                header::ACCESS_CONTROL_ALLOW_METHODS,
                HeaderValue::from_static(ALLOWED_METHODS),
            );
            headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, requested_headers);
        } else {
            tracing::warn!(
                origin = ?req.headers().get(header::ORIGIN),
                "preflight from disallowed origin"
            );
        }
        res.headers_mut()
            .append(header::VARY, HeaderValue::from_static("Origin"));
        return res;
    }

    let mut res = next.run(req).await;
    if allowed {
        insert_allow_origin(res.headers_mut(), &state);
    }
    res.headers_mut()
        .append(header::VARY, HeaderValue::from_static("Origin"));
    res
}

fn is_preflight(req: &axum::http::Request<axum::body::Body>) -> bool {
    req.method() == Method::OPTIONS
        && req
            .headers()
            .contains_key(header::ACCESS_CONTROL_REQUEST_METHOD)
}

fn insert_allow_origin(headers: &mut HeaderMap, state: &CorsState) {
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        state.allowed_origin.clone(),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
        HeaderValue::from_static("true"),
    );
}
