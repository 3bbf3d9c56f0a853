mod reload;

use crate::state::AppState;
use axum::{routing::post, Router};

pub fn routes() -> Router<AppState> {
    Router::new().route("/config/reload", post(reload::reload_records))
}
