pub mod config;
pub mod content;
pub mod domain;
pub mod export;
pub mod filter;
pub mod geometry;
pub mod map;
pub mod reveal;

pub use domain::{Category, Region};
