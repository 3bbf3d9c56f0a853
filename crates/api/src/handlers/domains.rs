use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use dnsm_domain::{Domain, DomainPage};
use tracing::debug;

use crate::{
    dto::{DomainRequest, ListResponse, PageQuery},
    errors::ApiError,
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/dns", get(list_domains).post(upsert_domain))
        .route("/dns/page", get(list_domains_paged))
        .route("/dns/{domain}", get(get_domain).delete(delete_domain))
}

async fn list_domains(State(state): State<AppState>) -> Json<ListResponse<String>> {
    let names = state.domains.get.get_all().await;
    debug!(count = names.len(), "Domains listed");
    Json(ListResponse::new(names))
}

async fn list_domains_paged(
    State(state): State<AppState>,
    Query(params): Query<PageQuery>,
) -> Json<DomainPage> {
    let request = params.to_request();
    let page = state.domains.get.get_page(request).await;
    debug!(
        page = request.page(),
        page_size = request.page_size(),
        total = page.total,
        "Domain page listed"
    );
    Json(page)
}

async fn get_domain(
    State(state): State<AppState>,
    Path(domain): Path<String>,
) -> Result<Json<Domain>, ApiError> {
    let domain = state.domains.get.get_by_name(&domain).await?;
    Ok(Json(domain))
}

async fn upsert_domain(
    State(state): State<AppState>,
    Json(req): Json<DomainRequest>,
) -> Result<(StatusCode, Json<Domain>), ApiError> {
    let domain = req.into_domain(state.default_ttl)?;
    let saved = state.domains.upsert.execute(domain).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

async fn delete_domain(
    State(state): State<AppState>,
    Path(domain): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.domains.delete.execute(&domain).await?;
    Ok(StatusCode::NO_CONTENT)
}
