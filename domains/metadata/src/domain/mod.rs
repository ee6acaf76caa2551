//! Metadata domain layer: entities and lookup keys

pub mod entities;
