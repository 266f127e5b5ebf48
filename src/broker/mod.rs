// broker/mod.rs

pub mod portfolio;

pub use portfolio::Portfolio;
