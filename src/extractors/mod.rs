//! Request extractors that reject with `AppError` so every failure renders the same error body.

pub mod payload;

pub use payload::{Links, Param, Payload};
