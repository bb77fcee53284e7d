use crate::signup::views;
use axum::response::Html;

// axum handler for the landing page
pub async fn root() -> Html<String> {
    Html(views::index())
}
