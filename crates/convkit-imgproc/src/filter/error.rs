use convkit_image::ImageError;

/// An error type for the filter module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum FilterError {
    /// The kernel side length must be odd and non-zero.
    #[error("Invalid kernel size {0}, expected an odd size >= 1")]
    InvalidKernelSize(usize),

    /// The number of weights does not match the kernel size.
    #[error("Invalid kernel length {0}, expected {1} weights")]
    InvalidKernelLength(usize, usize),

    /// A separable pass was requested for a kernel without a 1D decomposition.
    #[error("Kernel of size {0} is not separable into 1D")]
    KernelNotSeparable(usize),

    /// Error from the image module.
    #[error(transparent)]
    Image(#[from] ImageError),
}
