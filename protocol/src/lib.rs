//! Action requests for a board, whether they come from a local input device or a remote peer.
//!
//! Every source yields the same [`Request`]s, and a single [`GameHost`] applies them to its board
//! one at a time. Remote peers speak JSON lines: one [`Request`] per line in, one
//! [`ServerMessage`] per line out.

pub use error::*;
pub use host::*;
pub use message::*;
pub use source::*;

mod error;
mod host;
mod message;
mod source;
