use axum::extract::FromRequest;

use crate::error::EngineError;

/// `Json` extractor whose rejections answer as [`EngineError`] JSON bodies.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(EngineError))]
pub struct ApiJson<T>(pub T);
