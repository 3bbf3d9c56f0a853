use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, put},
    Router,
};
use dnsm_domain::Record;
use tracing::debug;

use crate::{
    dto::{ListResponse, RecordRequest},
    errors::ApiError,
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/dns/{domain}/records", get(get_records).post(add_record))
        .route(
            "/dns/{domain}/records/{record}",
            put(update_record).delete(delete_record),
        )
}

async fn get_records(
    State(state): State<AppState>,
    Path(domain): Path<String>,
) -> Result<Json<ListResponse<Record>>, ApiError> {
    let records = state.records.get.execute(&domain).await?;
    debug!(domain = %domain, count = records.len(), "Records listed");
    Ok(Json(ListResponse::new(records)))
}

async fn add_record(
    State(state): State<AppState>,
    Path(domain): Path<String>,
    Json(req): Json<RecordRequest>,
) -> Result<(StatusCode, Json<Record>), ApiError> {
    let record_type = req.parse_type()?;
    let record = state
        .records
        .add
        .execute(&domain, req.name, record_type, req.value, req.ttl)
        .await?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn update_record(
    State(state): State<AppState>,
    Path((domain, record_name)): Path<(String, String)>,
    Json(req): Json<RecordRequest>,
) -> Result<Json<Record>, ApiError> {
    let record_type = req.parse_type()?;
    let record = state
        .records
        .update
        .execute(
            &domain,
            &record_name,
            req.name,
            record_type,
            req.value,
            req.ttl,
        )
        .await?;
    Ok(Json(record))
}

async fn delete_record(
    State(state): State<AppState>,
    Path((domain, record_name)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    state.records.delete.execute(&domain, &record_name).await?;
    Ok(StatusCode::NO_CONTENT)
}
