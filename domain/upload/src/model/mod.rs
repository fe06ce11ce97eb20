pub mod entity;
mod measure;
pub mod vo;

pub use measure::{human_size, ByteMeasure};
