pub mod error_detail;
pub mod store;

pub use error_detail::expose_error_detail;
pub use store::require_store;
