use axum::response::Html;

use crate::modules::storefront::footer::render_footer;

/// GET /api/storefront/footer - static footer markup
pub async fn footer() -> Html<String> {
    Html(render_footer())
}
