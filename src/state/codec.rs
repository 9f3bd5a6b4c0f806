//! Continuation token codec
//!
//! Token layout: URL-safe base64 (no padding) of
//! `{"v":1,"s":[{"t":"<tag>","c":"<cursor>"}, ...]}` with frames listed
//! bottom to top. The empty stack is the empty string.

use super::types::{PhaseFrame, PhaseStack};
use crate::error::{Error, Result};
use crate::types::ResourceTypeTag;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::Deserialize;
use serde_json::json;

/// Current token format version
pub const TOKEN_VERSION: u8 = 1;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TokenEnvelope {
    v: u8,
    s: Vec<TokenFrame>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TokenFrame {
    t: ResourceTypeTag,
    #[serde(default)]
    c: String,
}

/// Serialize a stack. Never fails.
pub fn encode(stack: &PhaseStack) -> String {
    if stack.is_empty() {
        return String::new();
    }

    let frames: Vec<_> = stack
        .frames()
        .iter()
        .map(|frame| json!({ "t": frame.tag, "c": frame.cursor }))
        .collect();
    let envelope = json!({ "v": TOKEN_VERSION, "s": frames });

    URL_SAFE_NO_PAD.encode(envelope.to_string())
}

/// Exact inverse of [`encode`]: `""` is the empty stack.
///
/// Any other input that this codec could not have produced is an
/// `Error::Token`; it is never coerced to a fresh traversal.
pub fn decode_raw(token: &str) -> Result<PhaseStack> {
    if token.is_empty() {
        return Ok(PhaseStack::new());
    }

    let bytes = URL_SAFE_NO_PAD
        .decode(token)
        .map_err(|e| Error::token(format!("not valid base64: {e}")))?;

    let envelope: TokenEnvelope = serde_json::from_slice(&bytes)
        .map_err(|e| Error::token(format!("malformed token body: {e}")))?;

    if envelope.v != TOKEN_VERSION {
        return Err(Error::token(format!(
            "unsupported token version {}",
            envelope.v
        )));
    }

    if envelope.s.is_empty() {
        return Err(Error::token("token carries no frames"));
    }

    let frames = envelope
        .s
        .into_iter()
        .map(|frame| PhaseFrame::with_cursor(frame.t, frame.c))
        .collect();

    Ok(PhaseStack::from_frames(frames))
}
