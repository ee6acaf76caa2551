//! Dataset domain layer

pub mod entities;
