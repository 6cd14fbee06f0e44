mod async_client_codec;
mod async_frame_transport;

pub use async_client_codec::AsyncClientCodec;
pub use async_frame_transport::AsyncFrameTransport;
