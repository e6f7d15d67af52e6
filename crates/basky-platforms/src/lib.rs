pub mod adapter;
pub mod blinkit;
pub mod decode;
pub mod envelope;
pub mod error;
pub mod http;
pub mod price;
pub mod query;
pub mod zepto;

pub use adapter::{ProductContext, QuickCommercePlatform};
pub use blinkit::BlinkitClient;
pub use decode::Decoded;
pub use envelope::{ConfirmBody, Envelope};
pub use error::{Operation, PlatformError, CONNECT_FAILURE_MESSAGE, NO_PRODUCTS_MESSAGE};
pub use http::ApiClient;
pub use zepto::ZeptoClient;
