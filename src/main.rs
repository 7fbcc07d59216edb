use hfplay_ai::InferenceClient;
use hfplay_server::{server, utils::AppState};
use hfplay_shared::{APP_ENV, AppError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), AppError> {
  // Load .env before APP_ENV is first touched
  dotenvy::dotenv().ok();

  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
          "{}=debug,hfplay_server=debug,hfplay_ai=debug",
          env!("CARGO_CRATE_NAME")
        )
        .into()
      }),
    )
    .with(tracing_subscriber::fmt::layer())
    .with(tracing_error::ErrorLayer::default())
    .init();

  if APP_ENV.huggingface_api_key.is_none() {
    tracing::warn!("HUGGINGFACE_API_KEY is not set, requests must carry their own apiKey");
  }

  let client = InferenceClient::from_env()?;
  server(AppState::new(client), &APP_ENV.bind_addr).await
}
