#![deny(missing_docs)]
//! Image types for generating and manipulating multi-channel images

/// image representation indexed by column, row and channel.
pub mod image;

/// Error types for the image module.
pub mod error;

pub use crate::error::ImageError;
pub use crate::image::{Image, ImageShape};
