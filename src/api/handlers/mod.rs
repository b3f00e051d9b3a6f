//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod edit;
pub mod health;
pub mod qr_code;
pub mod redirect;
pub mod root;
pub mod shorten;

pub use edit::{edit_link_handler, link_details_handler};
pub use health::health_handler;
pub use qr_code::qr_code_handler;
pub use redirect::redirect_handler;
pub use root::root_handler;
pub use shorten::shorten_handler;
