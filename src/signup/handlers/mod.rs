//! Route handlers for the signup service.
//!
//! Shared state reaches the handlers through `Extension` layers installed by
//! [`crate::signup::router`]: an `Arc<dyn UserStore>` and a [`crate::model::Validator`].

pub mod health;
pub mod root;
pub mod user_login;
pub mod user_signup;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Generic 500 for storage failures; details only go to the log.
pub(crate) fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal Server Error".to_string(),
    )
        .into_response()
}
