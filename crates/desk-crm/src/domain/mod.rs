//! Domain layer

pub mod entities;
pub mod events;
pub mod value_objects;

pub use events::DomainEvent;
