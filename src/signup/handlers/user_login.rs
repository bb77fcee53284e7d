use crate::{
    model::{LoginInput, Validator, Violations},
    signup::{handlers::internal_error, views},
    store::UserStore,
};
use axum::{
    extract::{Extension, Form},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use std::sync::Arc;
use tracing::{debug, error, instrument};

#[utoipa::path(
    get,
    path= "/login",
    responses (
        (status = 200, description = "Blank login form", body = String, content_type = "text/html"),
    ),
    tag= "login"
)]
// axum handler for the login form
pub async fn login_form() -> Html<String> {
    Html(views::login_form(&LoginInput::default(), &Violations::new()))
}

#[utoipa::path(
    post,
    path= "/login",
    request_body(content = LoginInput, content_type = "application/x-www-form-urlencoded"),
    responses (
        (status = 200, description = "Login successful", body = String, content_type = "text/html"),
        (status = 401, description = "Unknown user or wrong password", body = String, content_type = "text/html"),
        (status = 422, description = "One or more fields are invalid", body = String, content_type = "text/html"),
        (status = 500, description = "User store failure", body = String),
    ),
    tag= "login"
)]
// axum handler for login submissions
#[instrument(skip(store, validator, payload))]
pub async fn login(
    Extension(store): Extension<Arc<dyn UserStore>>,
    Extension(validator): Extension<Validator>,
    payload: Option<Form<LoginInput>>,
) -> Response {
    let input = payload.map(|Form(input)| input).unwrap_or_default();

    debug!("login: {:?}", input);

    let attempt = match validator.validate(&input) {
        Ok(attempt) => attempt,
        Err(violations) => {
            debug!("Login rejected: {}", violations);

            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Html(views::login_form(&input, &violations)),
            )
                .into_response();
        }
    };

    // The typed password is compared with the stored ROT13 value as-is.
    match store
        .match_credentials(attempt.user_name(), attempt.password())
        .await
    {
        Ok(true) => {
            debug!("Login successful");

            (StatusCode::OK, Html(views::success(attempt.user_name()))).into_response()
        }
        Ok(false) => {
            debug!("Unauthorized");

            (StatusCode::UNAUTHORIZED, Html(views::failure())).into_response()
        }
        Err(e) => {
            error!("Error matching credentials: {}", e);

            internal_error()
        }
    }
}
