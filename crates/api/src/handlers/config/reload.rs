use axum::{extract::State, response::Json};
use serde_json::{json, Value};

use crate::{errors::ApiError, state::AppState};

pub async fn reload_records(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let snapshot = state.reload.execute().await?;
    Ok(Json(json!({
        "success": true,
        "version": snapshot.version(),
        "records": snapshot.records().len(),
    })))
}
