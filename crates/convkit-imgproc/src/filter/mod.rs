//! Filter operations
//!
//! This module provides zero-padded convolution of multi-channel images
//! against square filter kernels.

/// Filter kernel constructors
pub mod kernels;

/// Error types for the filter module.
mod error;
pub use error::FilterError;

/// Square filter kernel type
mod kernel;
pub use kernel::FilterKernel;

/// Sample conversion to and from the accumulator
mod sample;
pub use sample::FilterSample;

/// Convolution engine
mod convolution;
pub use convolution::*;
