//! Text normalization and resume records

pub mod resume;
pub mod text_processor;
