use crate::image::ImageShape;

/// An error type for the image module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// Error when the pixel data does not match the image shape.
    #[error("Data length ({0}) does not match the image shape ({1})")]
    InvalidDataLength(usize, usize),

    /// Error when the number of samples in a shape overflows `usize`.
    #[error("Image shape overflows the addressable size: {0}")]
    ShapeOverflow(ImageShape),

    /// Error when a pixel value cannot be represented in the target type.
    #[error("Failed to cast image data")]
    CastError,
}
