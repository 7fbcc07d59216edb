use axum::Json;
use hfplay_ai::catalog::Catalog;

/// Tasks, models and translation targets the playground offers
#[utoipa::path(
  get,
  path = "/api/catalog",
  responses((status = 200, description = "Task catalog", body = Catalog))
)]
#[axum::debug_handler]
pub async fn catalog() -> Json<Catalog> {
  Json(hfplay_ai::catalog())
}
