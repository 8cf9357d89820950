//! Ports layer (hexagonal architecture interfaces)

pub mod outbound;
