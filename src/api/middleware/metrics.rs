//! Request metrics, labelled by route template and tracked entity

use std::time::Instant;

use axum::{
    body::Body,
    extract::MatchedPath,
    http::Request,
    middleware::Next,
    response::Response,
};

use crate::domain::record::EntityKind;
use crate::infrastructure::observability::{record_entity_request, record_http_request};

/// Route label for requests no route matched (static files, 404s)
const UNMATCHED_ROUTE: &str = "unmatched";

pub async fn metrics_middleware(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let route = route_label(&request);
    let entity = entity_label(request.uri().path());

    let response = next.run(request).await;
    let status = response.status().as_u16();

    record_http_request(method.as_str(), &route, status, start.elapsed());
    if let Some(entity) = entity {
        record_entity_request(entity, method.as_str(), status);
    }

    response
}

/// The matched route template, e.g. `/api/{entity}/{id}`
fn route_label(request: &Request<Body>) -> String {
    request
        .extensions()
        .get::<MatchedPath>()
        .map(|mp| mp.as_str().to_string())
        .unwrap_or_else(|| UNMATCHED_ROUTE.to_string())
}

/// Entity named by an `/api/{entity}` path. Names outside the registry
/// collapse to "unknown" so the label set stays closed.
fn entity_label(path: &str) -> Option<&'static str> {
    let name = path.strip_prefix("/api/")?.split('/').next()?;
    if name.is_empty() {
        return None;
    }

    Some(EntityKind::resolve(name).map_or("unknown", |kind| kind.as_str()))
}
