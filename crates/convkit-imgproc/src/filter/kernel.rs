use super::FilterError;

// relative to the largest weight magnitude
const SEPARABLE_TOLERANCE: f32 = 1e-5;

/// A square filter kernel with an odd side length.
///
/// Weights are stored row-major, so `at(col, row)` reads
/// `weights[row * size + col]`. At construction the kernel checks whether it
/// is the outer product `v * v^T` of a single 1D vector. When it is, the
/// vector is kept and [`FilterKernel::at_1d`] exposes it to the separable
/// convolution path.
///
/// # Examples
///
/// ```
/// use convkit_imgproc::filter::FilterKernel;
///
/// let kernel = FilterKernel::from_1d(&[0.25, 0.5, 0.25]).unwrap();
/// assert!(kernel.is_separable_into_1d());
/// assert_eq!(kernel.at(1, 1), 0.25);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct FilterKernel {
    size: usize,
    weights: Vec<f32>,
    weights_1d: Option<Vec<f32>>,
}

fn check_size(size: usize) -> Result<(), FilterError> {
    if size == 0 || size % 2 == 0 {
        return Err(FilterError::InvalidKernelSize(size));
    }
    Ok(())
}

/// Find `v` such that `weights[r * size + c] == v[c] * v[r]`.
///
/// The vector is read from the row of the largest positive diagonal entry
/// and then verified against every weight.
fn symmetric_factor(size: usize, weights: &[f32]) -> Option<Vec<f32>> {
    let max_abs = weights.iter().fold(0.0f32, |acc, w| acc.max(w.abs()));
    if max_abs == 0.0 {
        return Some(vec![0.0; size]);
    }
    let tol = max_abs * SEPARABLE_TOLERANCE;

    let (pivot, pivot_weight) = (0..size)
        .map(|d| (d, weights[d * size + d]))
        .fold((0, f32::MIN), |best, cur| if cur.1 > best.1 { cur } else { best });

    if pivot_weight <= tol {
        return None;
    }

    let scale = pivot_weight.sqrt();
    let factor = weights[pivot * size..(pivot + 1) * size]
        .iter()
        .map(|w| w / scale)
        .collect::<Vec<f32>>();

    for row in 0..size {
        for col in 0..size {
            if (weights[row * size + col] - factor[col] * factor[row]).abs() > tol {
                return None;
            }
        }
    }

    Some(factor)
}

impl FilterKernel {
    /// Create a kernel from row-major weights.
    ///
    /// # Arguments
    ///
    /// * `size` - The side length of the kernel. Must be odd.
    /// * `weights` - `size * size` weights in row-major order.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidKernelSize`] for an even or zero size and
    /// [`FilterError::InvalidKernelLength`] when the weight count is wrong.
    pub fn new(size: usize, weights: Vec<f32>) -> Result<Self, FilterError> {
        check_size(size)?;
        if weights.len() != size * size {
            return Err(FilterError::InvalidKernelLength(weights.len(), size * size));
        }
        Ok(Self::from_square(size, weights))
    }

    /// Create a separable kernel as the outer product of a 1D kernel with itself.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidKernelSize`] when the length is even or zero.
    pub fn from_1d(weights_1d: &[f32]) -> Result<Self, FilterError> {
        let size = weights_1d.len();
        check_size(size)?;

        let weights = (0..size)
            .flat_map(|row| weights_1d.iter().map(move |&w| w * weights_1d[row]))
            .collect();

        Ok(Self {
            size,
            weights,
            weights_1d: Some(weights_1d.to_vec()),
        })
    }

    /// Build a kernel from weights whose shape is already known to be valid.
    pub(crate) fn from_square(size: usize, weights: Vec<f32>) -> Self {
        let weights_1d = symmetric_factor(size, &weights);
        log::debug!(
            "kernel of size {} is {}separable into 1D",
            size,
            if weights_1d.is_some() { "" } else { "not " }
        );
        Self {
            size,
            weights,
            weights_1d,
        }
    }

    /// The side length of the kernel.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of taps on each side of the center tap.
    pub fn center(&self) -> usize {
        (self.size - 1) / 2
    }

    /// Whether the kernel decomposes into a single 1D kernel applied along both axes.
    pub fn is_separable_into_1d(&self) -> bool {
        self.weights_1d.is_some()
    }

    /// The 2D weight at the given kernel column and row.
    ///
    /// # Panics
    ///
    /// If `col` or `row` is not smaller than the kernel size.
    #[inline]
    pub fn at(&self, col: usize, row: usize) -> f32 {
        assert!(col < self.size && row < self.size, "kernel index out of range");
        self.weights[row * self.size + col]
    }

    /// The 1D weight at `idx`.
    ///
    /// Only meaningful for separable kernels; returns `0.0` otherwise.
    ///
    /// # Panics
    ///
    /// If `idx` is not smaller than the kernel size.
    #[inline]
    pub fn at_1d(&self, idx: usize) -> f32 {
        assert!(idx < self.size, "kernel index out of range");
        self.weights_1d.as_ref().map_or(0.0, |w| w[idx])
    }

    /// The row-major 2D weights.
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// The 1D weights, if the kernel is separable.
    pub fn weights_1d(&self) -> Option<&[f32]> {
        self.weights_1d.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_kernel_invalid_size() {
        assert_eq!(
            FilterKernel::new(2, vec![1.0; 4]),
            Err(FilterError::InvalidKernelSize(2))
        );
        assert_eq!(
            FilterKernel::new(0, vec![]),
            Err(FilterError::InvalidKernelSize(0))
        );
        assert_eq!(
            FilterKernel::from_1d(&[0.5, 0.5]),
            Err(FilterError::InvalidKernelSize(2))
        );
    }

    #[test]
    fn test_kernel_invalid_length() {
        assert_eq!(
            FilterKernel::new(3, vec![1.0; 8]),
            Err(FilterError::InvalidKernelLength(8, 9))
        );
    }

    #[test]
    fn test_kernel_lookup() -> Result<(), FilterError> {
        #[rustfmt::skip]
        let kernel = FilterKernel::new(3, vec![
            1.0, 2.0, 3.0,
            4.0, 5.0, 6.0,
            7.0, 8.0, 9.0,
        ])?;
        assert_eq!(kernel.size(), 3);
        assert_eq!(kernel.center(), 1);
        assert_eq!(kernel.at(2, 0), 3.0);
        assert_eq!(kernel.at(0, 2), 7.0);
        assert!(!kernel.is_separable_into_1d());
        assert_eq!(kernel.at_1d(1), 0.0);
        assert_eq!(kernel.weights_1d(), None);
        Ok(())
    }

    #[test]
    fn test_kernel_from_1d() -> Result<(), FilterError> {
        let kernel = FilterKernel::from_1d(&[1.0, 2.0, 1.0])?;
        #[rustfmt::skip]
        assert_eq!(kernel.weights(), &[
            1.0, 2.0, 1.0,
            2.0, 4.0, 2.0,
            1.0, 2.0, 1.0,
        ]);
        assert_eq!(kernel.weights_1d(), Some(&[1.0, 2.0, 1.0][..]));
        assert_eq!(kernel.at_1d(1), 2.0);
        Ok(())
    }

    #[test]
    fn test_kernel_detects_outer_product() -> Result<(), FilterError> {
        #[rustfmt::skip]
        let kernel = FilterKernel::new(3, vec![
            1.0, 2.0, 1.0,
            2.0, 4.0, 2.0,
            1.0, 2.0, 1.0,
        ])?;
        assert!(kernel.is_separable_into_1d());
        for (idx, expected) in [1.0, 2.0, 1.0].iter().enumerate() {
            assert_relative_eq!(kernel.at_1d(idx), *expected, epsilon = 1e-6);
        }
        Ok(())
    }

    #[test]
    fn test_kernel_rejects_non_symmetric_rank_one() -> Result<(), FilterError> {
        // sobel is rank one but needs different horizontal and vertical vectors
        #[rustfmt::skip]
        let kernel = FilterKernel::new(3, vec![
            -1.0, 0.0, 1.0,
            -2.0, 0.0, 2.0,
            -1.0, 0.0, 1.0,
        ])?;
        assert!(!kernel.is_separable_into_1d());
        Ok(())
    }

    #[test]
    fn test_kernel_negative_outer_product_not_separable() -> Result<(), FilterError> {
        let kernel = FilterKernel::new(3, vec![-1.0; 9])?;
        assert!(!kernel.is_separable_into_1d());
        Ok(())
    }

    #[test]
    fn test_kernel_zero_is_separable() -> Result<(), FilterError> {
        let kernel = FilterKernel::new(3, vec![0.0; 9])?;
        assert!(kernel.is_separable_into_1d());
        assert_eq!(kernel.weights_1d(), Some(&[0.0, 0.0, 0.0][..]));
        Ok(())
    }

    #[test]
    #[should_panic]
    fn test_kernel_at_out_of_range() {
        let kernel = FilterKernel::from_1d(&[1.0]).unwrap();
        kernel.at(1, 0);
    }
}
