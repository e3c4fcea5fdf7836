//! Liveness and readiness endpoints

use std::time::Instant;

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;

use super::state::AppState;
use crate::api::types::Json;
use crate::domain::record::EntityKind;

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
}

/// Readiness of the store, one entry per tracked entity
#[derive(Serialize)]
pub struct ReadinessResponse {
    pub status: HealthStatus,
    pub version: String,
    pub collections: Vec<CollectionCheck>,
    pub latency_ms: u64,
}

/// Result of reading one entity collection
#[derive(Serialize)]
pub struct CollectionCheck {
    pub entity: &'static str,
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub records: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ReadinessResponse {
    fn from_checks(collections: Vec<CollectionCheck>, started: Instant) -> Self {
        let status = if collections.iter().all(|c| c.status == HealthStatus::Healthy) {
            HealthStatus::Healthy
        } else {
            HealthStatus::Unhealthy
        };

        Self {
            status,
            version: env!("CARGO_PKG_VERSION").to_string(),
            collections,
            latency_ms: started.elapsed().as_millis() as u64,
        }
    }

    fn status_code(&self) -> StatusCode {
        match self.status {
            HealthStatus::Healthy => StatusCode::OK,
            HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

/// GET /health
pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: HealthStatus::Healthy,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /ready - 503 when any collection cannot be read
pub async fn ready_check(State(state): State<AppState>) -> impl IntoResponse {
    let started = Instant::now();
    let mut collections = Vec::with_capacity(EntityKind::ALL.len());

    for kind in EntityKind::ALL {
        collections.push(check_collection(&state, kind).await);
    }

    let response = ReadinessResponse::from_checks(collections, started);
    (response.status_code(), Json(response))
}

/// GET /live
pub async fn live_check() -> impl IntoResponse {
    StatusCode::OK
}

async fn check_collection(state: &AppState, kind: EntityKind) -> CollectionCheck {
    match state.records.store().count(kind).await {
        Ok(count) => CollectionCheck {
            entity: kind.as_str(),
            status: HealthStatus::Healthy,
            records: Some(count),
            error: None,
        },
        Err(e) => {
            tracing::warn!(entity = kind.as_str(), error = %e, "Collection unreadable");
            CollectionCheck {
                entity: kind.as_str(),
                status: HealthStatus::Unhealthy,
                records: None,
                error: Some(e.to_string()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn healthy(entity: &'static str, records: usize) -> CollectionCheck {
        CollectionCheck {
            entity,
            status: HealthStatus::Healthy,
            records: Some(records),
            error: None,
        }
    }

    #[test]
    fn test_all_readable_collections_are_ready() {
        let response = ReadinessResponse::from_checks(
            vec![healthy("Seizure", 3), healthy("Medication", 0)],
            Instant::now(),
        );

        assert_eq!(response.status, HealthStatus::Healthy);
        assert_eq!(response.status_code(), StatusCode::OK);
    }

    #[test]
    fn test_one_unreadable_collection_fails_readiness() {
        let broken = CollectionCheck {
            entity: "DoseLog",
            status: HealthStatus::Unhealthy,
            records: None,
            error: Some("Malformed storage for DoseLog: eof".to_string()),
        };
        let response =
            ReadinessResponse::from_checks(vec![healthy("Seizure", 1), broken], Instant::now());

        assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "unhealthy");
        assert_eq!(json["collections"][0], serde_json::json!({
            "entity": "Seizure",
            "status": "healthy",
            "records": 1
        }));
        assert_eq!(json["collections"][1]["error"], "Malformed storage for DoseLog: eof");
        assert!(json["collections"][1].get("records").is_none());
    }

    #[test]
    fn test_health_response_shape() {
        let json = serde_json::to_value(HealthResponse {
            status: HealthStatus::Healthy,
            version: "1.0.0".to_string(),
        })
        .unwrap();

        assert_eq!(json, serde_json::json!({"status": "healthy", "version": "1.0.0"}));
    }
}
