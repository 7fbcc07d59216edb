use axum::{Router, response::Html, routing::get};
use hfplay_shared::AppError;
use tokio::net::TcpListener;

use crate::{
  api,
  utils::{AppState, shutdown_signal},
};

#[axum::debug_handler]
async fn handler() -> Html<&'static str> {
  Html("<h1>hfplay</h1><p>API reference at <a href=\"/openapi/\">/openapi/</a></p>")
}

/// Full router with state applied.
pub fn app(app_state: AppState) -> Router {
  Router::new()
    .route("/", get(handler))
    .merge(api::app())
    .with_state(app_state)
}

pub async fn server(app_state: AppState, bind_addr: &str) -> Result<(), AppError> {
  let listener = TcpListener::bind(bind_addr).await?;

  tracing::info!("server started at http://{bind_addr}");

  axum::serve(listener, app(app_state))
    .with_graceful_shutdown(shutdown_signal())
    .await?;

  Ok(())
}
