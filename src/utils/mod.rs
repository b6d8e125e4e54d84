mod bytes;
pub mod logging;

pub use bytes::format_bytes;
