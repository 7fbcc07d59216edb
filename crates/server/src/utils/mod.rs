mod extract;
pub use extract::{ApiJson, Form, required};

mod shutdown_signal;
pub use shutdown_signal::shutdown_signal;

mod state;
pub use state::AppState;
