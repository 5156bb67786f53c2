//! Zero-padded 2D image convolution.
//!
//! ```
//! use convkit::image::Image;
//! use convkit::imgproc::filter::{convolution, kernels};
//!
//! let image = Image::<u8>::from_shape_val([8, 8, 3].into(), 100).unwrap();
//! let kernel = kernels::gaussian(3, 1.0).unwrap();
//! let blurred: Image<u8> = convolution(&image, &kernel).unwrap();
//!
//! assert_eq!(blurred.shape(), image.shape());
//! assert_eq!(*blurred.at(4, 4, 0), 100);
//! ```

#[doc(inline)]
pub use convkit_image as image;

#[doc(inline)]
pub use convkit_imgproc as imgproc;
