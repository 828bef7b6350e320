pub mod error;
pub mod health;
pub mod scan;
pub mod tags;
