use convkit_image::Image;

use super::{FilterError, FilterKernel, FilterSample};

/// Selects the algorithm used by [`convolution_with_method`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConvolutionMethod {
    /// Use the separable path when the kernel decomposes into 1D, the direct path otherwise.
    #[default]
    Auto,

    /// Always use the direct 2D convolution, O(W·H·C·K²).
    Direct,

    /// Always use two 1D passes, O(W·H·C·K) each.
    ///
    /// Fails for kernels that are not separable.
    Separable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Horizontal,
    Vertical,
}

/// Read a sample as `f32`, treating anything outside the image as zero.
#[inline]
fn zero_padded<T: FilterSample>(src: &Image<T>, col: isize, row: isize, channel: usize) -> f32 {
    src.get_padded(col, row, channel)
        .map_or(0.0, |v| v.to_f32())
}

fn convolve_direct<TIn, TOut>(src: &Image<TIn>, dst: &mut Image<TOut>, kernel: &FilterKernel)
where
    TIn: FilterSample,
    TOut: FilterSample,
{
    let size = kernel.size();
    let center = kernel.center() as isize;

    for col in 0..src.width() {
        for row in 0..src.height() {
            for ch in 0..src.num_channels() {
                let mut acc = 0.0f32;
                for kernel_col in 0..size {
                    for kernel_row in 0..size {
                        let x = col as isize - center + kernel_col as isize;
                        let y = row as isize - center + kernel_row as isize;
                        acc += kernel.at(kernel_col, kernel_row) * zero_padded(src, x, y, ch);
                    }
                }
                *dst.at_mut(col, row, ch) = TOut::from_f32(acc);
            }
        }
    }
}

/// One 1D pass along `axis`; the other coordinate is never offset.
fn convolve_pass<TIn, TOut>(
    src: &Image<TIn>,
    dst: &mut Image<TOut>,
    kernel: &FilterKernel,
    axis: Axis,
) where
    TIn: FilterSample,
    TOut: FilterSample,
{
    let size = kernel.size();
    let center = kernel.center() as isize;

    for row in 0..src.height() {
        for col in 0..src.width() {
            for ch in 0..src.num_channels() {
                let mut acc = 0.0f32;
                for k in 0..size {
                    let offset = k as isize - center;
                    let (x, y) = match axis {
                        Axis::Horizontal => (col as isize + offset, row as isize),
                        Axis::Vertical => (col as isize, row as isize + offset),
                    };
                    acc += kernel.at_1d(k) * zero_padded(src, x, y, ch);
                }
                *dst.at_mut(col, row, ch) = TOut::from_f32(acc);
            }
        }
    }
}

fn convolve_separable<TIn, TOut>(
    src: &Image<TIn>,
    dst: &mut Image<TOut>,
    kernel: &FilterKernel,
) -> Result<(), FilterError>
where
    TIn: FilterSample,
    TOut: FilterSample,
{
    // the horizontal result stays in f32 so only the final store narrows
    let mut horizontal = Image::<f32>::zeros(src.shape())?;
    convolve_pass(src, &mut horizontal, kernel, Axis::Horizontal);
    convolve_pass(&horizontal, dst, kernel, Axis::Vertical);
    Ok(())
}

/// Convolve an image with a square kernel using zero padding.
///
/// Separable kernels are applied as a horizontal then a vertical 1D pass,
/// all other kernels with the direct 2D sum. Both paths accumulate in `f32`
/// and convert once into `TOut`, see [`FilterSample`] for the rounding rule.
///
/// # Arguments
///
/// * `src` - The source image. It is not modified.
/// * `kernel` - The filter kernel.
///
/// # Returns
///
/// A new image with the same shape as `src`.
///
/// # Examples
///
/// ```
/// use convkit_image::Image;
/// use convkit_imgproc::filter::{convolution, kernels};
///
/// let image = Image::<u8>::from_shape_val([4, 4, 3].into(), 10).unwrap();
/// let filtered: Image<f32> = convolution(&image, &kernels::identity()).unwrap();
///
/// assert_eq!(filtered.shape(), image.shape());
/// assert!(filtered.as_slice().iter().all(|&v| v == 10.0));
/// ```
pub fn convolution<TIn, TOut>(
    src: &Image<TIn>,
    kernel: &FilterKernel,
) -> Result<Image<TOut>, FilterError>
where
    TIn: FilterSample,
    TOut: FilterSample,
{
    convolution_with_method(src, kernel, ConvolutionMethod::Auto)
}

/// Convolve an image with a square kernel, choosing the algorithm explicitly.
///
/// # Arguments
///
/// * `src` - The source image. It is not modified.
/// * `kernel` - The filter kernel.
/// * `method` - The algorithm: `Auto`, `Direct` or `Separable`.
///
/// # Errors
///
/// Returns [`FilterError::KernelNotSeparable`] when `Separable` is requested for
/// a kernel without a 1D decomposition.
pub fn convolution_with_method<TIn, TOut>(
    src: &Image<TIn>,
    kernel: &FilterKernel,
    method: ConvolutionMethod,
) -> Result<Image<TOut>, FilterError>
where
    TIn: FilterSample,
    TOut: FilterSample,
{
    let separable = match method {
        ConvolutionMethod::Auto => kernel.is_separable_into_1d(),
        ConvolutionMethod::Direct => false,
        ConvolutionMethod::Separable if kernel.is_separable_into_1d() => true,
        ConvolutionMethod::Separable => {
            return Err(FilterError::KernelNotSeparable(kernel.size()));
        }
    };

    log::debug!(
        "convolving {} with a {}x{} kernel using the {} path",
        src.shape(),
        kernel.size(),
        kernel.size(),
        if separable { "separable" } else { "direct" }
    );

    let mut dst = Image::<TOut>::zeros(src.shape())?;
    if separable {
        convolve_separable(src, &mut dst, kernel)?;
    } else {
        convolve_direct(src, &mut dst, kernel);
    }

    Ok(dst)
}
