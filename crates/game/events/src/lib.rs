//! Topic catalog and payload contracts for the game event bus.
//!
//! Every topic in [`topics`] has exactly one canonical payload type in
//! [`payloads`]. Producers build the payload with its `new` constructor, which
//! stamps the creation time; consumers destructure the concrete type. A few
//! legacy topics carry `()`, `bool`, or `String` instead of a record; the
//! catalog documents which ones.
pub mod payloads;
pub mod topics;

pub use payloads::*;
pub use topics::Domain;
