// extensions/mod.rs
//
// Opt-in systems that live beside Scene rather than inside Node.

pub mod transform;

pub use transform::{TransformGraph, LocalTransform};
