pub mod config;
pub mod controllers;
pub mod error;
pub mod population;
pub mod simulation;

pub use error::SimError;
