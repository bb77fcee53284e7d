use crate::{
    model::{SignupInput, Validator, Violations},
    signup::{handlers::internal_error, views},
    store::UserStore,
};
use axum::{
    extract::{Extension, Form},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

#[utoipa::path(
    get,
    path= "/signup",
    responses (
        (status = 200, description = "Blank signup form", body = String, content_type = "text/html"),
    ),
    tag= "signup"
)]
// axum handler for the signup form
pub async fn signup_form() -> Html<String> {
    Html(views::signup_form(
        &SignupInput::default(),
        &Violations::new(),
        None,
    ))
}

#[utoipa::path(
    post,
    path= "/signup",
    request_body(content = SignupInput, content_type = "application/x-www-form-urlencoded"),
    responses (
        (status = 303, description = "User saved, redirect to /login"),
        (status = 409, description = "User name already exists", body = String, content_type = "text/html"),
        (status = 422, description = "One or more fields are invalid", body = String, content_type = "text/html"),
        (status = 500, description = "User store failure", body = String),
    ),
    tag= "signup"
)]
// axum handler for signup submissions
#[instrument(skip(store, validator, payload))]
pub async fn signup(
    Extension(store): Extension<Arc<dyn UserStore>>,
    Extension(validator): Extension<Validator>,
    payload: Option<Form<SignupInput>>,
) -> Response {
    // an unreadable body binds as an empty form and fails validation below
    let input = payload.map(|Form(input)| input).unwrap_or_default();

    debug!("signup: {:?}", input);

    let record = match validator.validate(&input) {
        Ok(record) => record,
        Err(violations) => {
            debug!("Signup rejected: {}", violations);

            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Html(views::signup_form(&input, &violations, None)),
            )
                .into_response();
        }
    };

    // check if user exists
    match store.exists_by_user_name(record.user_name()).await {
        Ok(true) => {
            info!(user_name = record.user_name(), "User name already exists");

            return (
                StatusCode::CONFLICT,
                Html(views::signup_form(
                    &input,
                    &Violations::new(),
                    Some(views::USER_NAME_EXISTS),
                )),
            )
                .into_response();
        }
        Ok(false) => (),
        Err(e) => {
            error!("Error checking if user exists: {}", e);

            return internal_error();
        }
    }

    match store.save(record).await {
        Ok(saved) => {
            info!(
                user_id = ?saved.id(),
                user_name = saved.user_name(),
                "Saved user details"
            );

            Redirect::to("/login").into_response()
        }
        Err(e) => {
            error!("Error saving user: {}", e);

            internal_error()
        }
    }
}
