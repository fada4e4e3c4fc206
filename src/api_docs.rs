use crate::api;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health::health_check,
        api::products::list_products,
        api::colors::list_colors,
        api::colors::create_color,
        api::colors::update_color,
        api::colors::delete_color,
    ),
    tags(
        (name = "storedesk", description = "Store admin and storefront API")
    )
)]
pub struct ApiDoc;
