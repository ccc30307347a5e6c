//! Lumped, zero-dimensional objects: the vented vessel and its ambient
pub mod environment;
pub mod reservoir;
