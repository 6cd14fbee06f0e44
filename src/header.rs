mod header_cursor;
mod header_error;
mod header_pool;
mod request_header;
mod response_header;

pub use header_error::HeaderDecodeError;
pub use header_pool::{HeaderPool, PooledHeader, REQUEST_POOL, RESPONSE_POOL, Reset};
pub use request_header::RequestHeader;
pub use response_header::ResponseHeader;
