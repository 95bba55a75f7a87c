//! Domain layer: pure types and transformations, no I/O.

pub mod foundation;
pub mod policy;
pub mod rendering;
