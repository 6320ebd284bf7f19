//! HTTP handlers, one module per resource.

pub mod category;
pub mod country;
pub mod owner;
pub mod pokemon;
pub mod review;
pub mod reviewer;
