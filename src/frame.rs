mod frame_error;
mod frame_transport;

pub use frame_error::{FrameDecodeError, FrameError};
pub use frame_transport::FrameTransport;
