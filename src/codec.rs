mod call_encoding;
mod client_codec;
mod client_codec_config;
mod codec_error;
mod pending_calls;
mod resolved_response;
mod response_slot;

pub use call_encoding::{CallEncoding, EncodedRequest};
pub use client_codec::ClientCodec;
pub use client_codec_config::ClientCodecConfig;
pub use codec_error::CodecError;
pub use pending_calls::{PendingCalls, Reservation};
pub use resolved_response::ResolvedResponse;
pub use response_slot::{ReadPhase, ResponseSlot};
