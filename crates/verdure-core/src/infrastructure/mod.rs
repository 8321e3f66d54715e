//! Infrastructure layer - adapters implementing the core's ports

pub mod adapters;
