//! Traversal state module
//!
//! Handles the caller-visible continuation token and the stack of pending
//! enumeration phases it encodes.
//!
//! # Overview
//!
//! The state module provides:
//! - `PhaseFrame` - One phase tag with its in-flight backend cursor
//! - `PhaseStack` - LIFO stack of frames; the top frame runs next
//! - `encode` / `decode_raw` - Exact round trip between a stack and its token
//!
//! Nothing here is persisted. A stack is rebuilt from the token at the start
//! of every call and serialized again at the end.

mod codec;
mod types;

pub use codec::{decode_raw, encode, TOKEN_VERSION};
pub use types::{PhaseFrame, PhaseStack};
