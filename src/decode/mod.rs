//! Response decoder module
//!
//! Turns a JSON response body into the list of item records for one page.
//!
//! # Overview
//!
//! Every list endpoint returns JSON. Header-cursor endpoints return a bare
//! array at the root; body-cursor endpoints wrap the array under a field
//! path such as `data`. Decoding is strict: a body that is not valid JSON,
//! or whose record location holds something other than an array, is an
//! `Error::Decode`.

mod decoders;
mod types;

pub use decoders::{extract_path, JsonDecoder};
pub use types::RecordDecoder;
