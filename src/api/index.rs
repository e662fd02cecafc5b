use axum::{
    http::{StatusCode, Uri},
    response::Html,
};

use crate::warning;

const INDEX_HTML: &str = include_str!("../../static/index.html");

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn not_found(uri: Uri) -> (StatusCode, Html<String>) {
    warning!("404 error: {}", uri.path());
    (
        StatusCode::NOT_FOUND,
        Html(format!(
            "<h2>Page not found</h2><p>{}</p><a href=\"/\">Go back home</a>",
            uri.path()
                .replace('&', "&amp;")
                .replace('<', "&lt;")
                .replace('>', "&gt;")
        )),
    )
}
