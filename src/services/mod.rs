pub mod order_service;
pub mod overview_service;
pub mod view_service;
