//! API Routes

pub mod customers;
pub mod health;
pub mod segments;
pub mod tags;
