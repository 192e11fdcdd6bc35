//! HTTP request handlers.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod create_url;
pub mod health;
pub mod home;
pub mod redirect;
pub mod url_details;

pub use create_url::create_url_handler;
pub use health::health_handler;
pub use home::home_handler;
pub use redirect::redirect_handler;
pub use url_details::url_details_handler;
