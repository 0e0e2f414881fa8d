pub mod api_error;
pub mod restaurant_api;
