//! Wire schemas (DTOs) for every collection, decoded with serde.
//!
//! All payloads are camelCase JSON. A missing required field or a mistyped value is a
//! decoding error, never a silently defaulted field.

pub mod order;
pub mod product;
pub mod stock;

pub use order::*;
pub use product::*;
pub use stock::*;
