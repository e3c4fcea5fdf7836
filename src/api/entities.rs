//! Generic entity endpoints: `/api/{entity}` and `/api/{entity}/{id}`

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, Query};
use crate::domain::record::{EntityKind, ListQuery, Record};

/// `?order_by=-field&limit=n`
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub order_by: Option<String>,
    pub limit: Option<String>,
}

impl ListParams {
    /// Empty values mean "not given"; a non-integer limit is rejected
    pub fn to_query(&self) -> Result<ListQuery, ApiError> {
        let mut query = ListQuery::new();

        if let Some(order_by) = self.order_by.as_deref() {
            query = query.with_order_by(order_by);
        }

        if let Some(limit) = self.limit.as_deref().map(str::trim).filter(|l| !l.is_empty()) {
            let limit = limit
                .parse::<i64>()
                .map_err(|_| ApiError::bad_request(format!("Invalid limit: '{}'", limit)))?;
            query = query.with_limit(limit);
        }

        Ok(query)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct DeleteParams {
    #[serde(default)]
    pub cascade: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeleteResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminders_deleted: Option<usize>,
}

/// GET /api/{entity}
pub async fn list_records(
    State(state): State<AppState>,
    Path(entity): Path<String>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Record>>, ApiError> {
    let query = params.to_query()?;
    let records = state.records.list(&entity, &query).await?;

    Ok(Json(records))
}

/// POST /api/{entity}
pub async fn create_record(
    State(state): State<AppState>,
    Path(entity): Path<String>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Record>), ApiError> {
    let record = state.records.create(&entity, body).await?;

    debug!(entity = %entity, id = ?record.id(), "Created via API");
    Ok((StatusCode::CREATED, Json(record)))
}

/// PUT /api/{entity}/{id}
pub async fn update_record(
    State(state): State<AppState>,
    Path((entity, id)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Result<Json<Record>, ApiError> {
    let record = state.records.update(&entity, &id, body).await?;
    Ok(Json(record))
}

/// DELETE /api/{entity}/{id}[?cascade=true]
pub async fn delete_record(
    State(state): State<AppState>,
    Path((entity, id)): Path<(String, String)>,
    Query(params): Query<DeleteParams>,
) -> Result<Json<DeleteResponse>, ApiError> {
    if !params.cascade {
        state.records.delete(&entity, &id).await?;

        return Ok(Json(DeleteResponse {
            success: true,
            reminders_deleted: None,
        }));
    }

    let kind = EntityKind::resolve(&entity)?;
    if kind != EntityKind::Medication {
        return Err(ApiError::bad_request(format!(
            "cascade is only supported for {}",
            EntityKind::Medication
        )));
    }

    let result = state.records.delete_medication_cascade(&id).await?;

    Ok(Json(DeleteResponse {
        success: true,
        reminders_deleted: Some(result.reminders_deleted),
    }))
}
