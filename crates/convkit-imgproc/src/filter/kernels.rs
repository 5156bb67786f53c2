use super::{FilterError, FilterKernel};

/// Create a box blur kernel.
///
/// # Arguments
///
/// * `kernel_size` - The size of the kernel. A size of 0 yields an empty vector.
///
/// # Returns
///
/// A vector of the kernel.
pub fn box_blur_kernel_1d(kernel_size: usize) -> Vec<f32> {
    vec![1.0 / kernel_size as f32; kernel_size]
}

/// Create a gaussian blur kernel.
///
/// # Arguments
///
/// * `kernel_size` - The size of the kernel.
/// * `sigma` - The sigma of the gaussian kernel. Must be positive, a zero sigma yields NaN weights.
///
/// # Returns
///
/// A vector of the kernel.
pub fn gaussian_kernel_1d(kernel_size: usize, sigma: f32) -> Vec<f32> {
    let mut kernel = Vec::with_capacity(kernel_size);

    let mean = kernel_size.saturating_sub(1) as f32 / 2.0;
    let sigma_sq = sigma * sigma;

    // compute the kernel
    for i in 0..kernel_size {
        let x = i as f32 - mean;
        kernel.push((-(x * x) / (2.0 * sigma_sq)).exp());
    }

    // normalize the kernel
    let norm = kernel.iter().sum::<f32>();
    kernel.iter_mut().for_each(|k| *k /= norm);
    kernel
}

/// The 1x1 identity kernel.
pub fn identity() -> FilterKernel {
    FilterKernel::from_square(1, vec![1.0])
}

/// A separable box blur kernel of the given odd size.
///
/// Fails with [`FilterError::InvalidKernelSize`] for an even or zero size.
pub fn box_blur(kernel_size: usize) -> Result<FilterKernel, FilterError> {
    FilterKernel::from_1d(&box_blur_kernel_1d(kernel_size))
}

/// A separable gaussian kernel of the given odd size.
///
/// Fails with [`FilterError::InvalidKernelSize`] for an even or zero size.
/// `sigma` must be positive, see [`gaussian_kernel_1d`].
pub fn gaussian(kernel_size: usize, sigma: f32) -> Result<FilterKernel, FilterError> {
    FilterKernel::from_1d(&gaussian_kernel_1d(kernel_size, sigma))
}

/// The 3x3 sharpen kernel.
pub fn sharpen() -> FilterKernel {
    #[rustfmt::skip]
    let weights = vec![
        0.0, -1.0, 0.0,
        -1.0, 5.0, -1.0,
        0.0, -1.0, 0.0,
    ];
    FilterKernel::from_square(3, weights)
}

/// The 4-connectivity 3x3 laplacian kernel.
pub fn laplacian() -> FilterKernel {
    #[rustfmt::skip]
    let weights = vec![
        0.0, 1.0, 0.0,
        1.0, -4.0, 1.0,
        0.0, 1.0, 0.0,
    ];
    FilterKernel::from_square(3, weights)
}

/// The 3x3 sobel kernel responding to horizontal gradients.
pub fn sobel_x() -> FilterKernel {
    #[rustfmt::skip]
    let weights = vec![
        -1.0, 0.0, 1.0,
        -2.0, 0.0, 2.0,
        -1.0, 0.0, 1.0,
    ];
    FilterKernel::from_square(3, weights)
}

/// The 3x3 sobel kernel responding to vertical gradients.
pub fn sobel_y() -> FilterKernel {
    #[rustfmt::skip]
    let weights = vec![
        -1.0, -2.0, -1.0,
        0.0, 0.0, 0.0,
        1.0, 2.0, 1.0,
    ];
    FilterKernel::from_square(3, weights)
}
