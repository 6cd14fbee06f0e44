//! Transport and framing layer for an RPC client.
//!
//! Calls are turned into a length-prefixed header frame followed by a raw,
//! optionally compressed body. Responses are matched back to their calls by
//! sequence id. The layers are independent:
//!
//! - [`frame`]: varint length-prefixed frames over any `Read`/`Write`.
//! - [`header`]: byte-exact request/response envelopes.
//! - [`compression`]: tag-keyed reversible byte transforms.
//! - [`serialization`]: pluggable payload encodings.
//! - [`codec`]: the client call codec that composes all of the above.
pub mod codec;
pub mod compression;
pub mod constants;
pub mod frame;
pub mod header;
pub mod serialization;
pub mod utils;
