mod error;
pub use error::{AppError, ErrorBody, ErrorKind};

mod env;
pub use env::{APP_ENV, AppEnv};

pub mod similarity;
pub use similarity::{SimilarityError, cosine_similarity};
