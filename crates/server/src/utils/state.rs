use hfplay_ai::InferenceClient;

#[derive(Clone, Debug)]
pub struct AppState {
  pub client: InferenceClient,
}

impl AppState {
  #[must_use]
  pub const fn new(client: InferenceClient) -> Self {
    Self { client }
  }
}
