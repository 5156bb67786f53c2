use num_traits::Zero;

use crate::error::ImageError;

/// Image shape in pixels and channels.
///
/// The triple is ordered as (x, y, z): width, height and number of channels.
///
/// # Examples
///
/// ```
/// use convkit_image::ImageShape;
///
/// let shape = ImageShape {
///     width: 10,
///     height: 20,
///     channels: 3,
/// };
///
/// assert_eq!(shape.num_elements(), 600);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ImageShape {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
    /// Number of channels per pixel
    pub channels: usize,
}

impl ImageShape {
    /// Total number of samples held by an image of this shape.
    ///
    /// Saturates at `usize::MAX`; use [`ImageShape::checked_num_elements`] to detect overflow.
    pub fn num_elements(&self) -> usize {
        self.checked_num_elements().unwrap_or(usize::MAX)
    }

    /// Total number of samples, or `None` if the product overflows `usize`.
    pub fn checked_num_elements(&self) -> Option<usize> {
        self.width
            .checked_mul(self.height)
            .and_then(|n| n.checked_mul(self.channels))
    }
}

impl std::fmt::Display for ImageShape {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageShape {{ width: {}, height: {}, channels: {} }}",
            self.width, self.height, self.channels
        )
    }
}

impl From<[usize; 3]> for ImageShape {
    fn from(shape: [usize; 3]) -> Self {
        ImageShape {
            width: shape[0],
            height: shape[1],
            channels: shape[2],
        }
    }
}

impl From<ImageShape> for [usize; 3] {
    fn from(shape: ImageShape) -> Self {
        [shape.width, shape.height, shape.channels]
    }
}

/// Represents an image with pixel data.
///
/// The samples are stored contiguously in row-major order with interleaved
/// channels, i.e. the sample at `(col, row, channel)` lives at offset
/// `(row * width + col) * channels + channel`.
#[derive(Clone, Debug, PartialEq)]
pub struct Image<T> {
    shape: ImageShape,
    data: Vec<T>,
}

impl<T> Image<T> {
    /// Create a new image from pixel data.
    ///
    /// # Arguments
    ///
    /// * `shape` - The shape of the image.
    /// * `data` - The pixel data of the image, row-major with interleaved channels.
    ///
    /// # Errors
    ///
    /// If the shape's sample count overflows `usize`, or the length of the pixel
    /// data does not match it, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use convkit_image::Image;
    ///
    /// let image = Image::<u8>::new([10, 20, 3].into(), vec![0u8; 10 * 20 * 3]).unwrap();
    ///
    /// assert_eq!(image.width(), 10);
    /// assert_eq!(image.height(), 20);
    /// assert_eq!(image.num_channels(), 3);
    /// ```
    pub fn new(shape: ImageShape, data: Vec<T>) -> Result<Self, ImageError> {
        let num_elements = shape
            .checked_num_elements()
            .ok_or(ImageError::ShapeOverflow(shape))?;

        if data.len() != num_elements {
            return Err(ImageError::InvalidDataLength(data.len(), num_elements));
        }

        Ok(Self { shape, data })
    }

    /// Create a new image with the given shape and every sample set to `val`.
    pub fn from_shape_val(shape: ImageShape, val: T) -> Result<Self, ImageError>
    where
        T: Clone,
    {
        let num_elements = shape
            .checked_num_elements()
            .ok_or(ImageError::ShapeOverflow(shape))?;
        Image::new(shape, vec![val; num_elements])
    }

    /// Create a new zero-initialized image with the given shape.
    pub fn zeros(shape: ImageShape) -> Result<Self, ImageError>
    where
        T: Clone + Zero,
    {
        Self::from_shape_val(shape, T::zero())
    }

    /// The shape of the image.
    pub fn shape(&self) -> ImageShape {
        self.shape
    }

    /// The width of the image in pixels.
    pub fn width(&self) -> usize {
        self.shape.width
    }

    /// The height of the image in pixels.
    pub fn height(&self) -> usize {
        self.shape.height
    }

    /// The number of channels per pixel.
    pub fn num_channels(&self) -> usize {
        self.shape.channels
    }

    /// The raw sample buffer.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// The raw sample buffer, mutable.
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the image and return its sample buffer.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    #[inline]
    fn offset(&self, col: usize, row: usize, channel: usize) -> Option<usize> {
        if col < self.shape.width && row < self.shape.height && channel < self.shape.channels {
            Some((row * self.shape.width + col) * self.shape.channels + channel)
        } else {
            None
        }
    }

    /// Get a sample, or `None` when any index is out of range.
    pub fn get(&self, col: usize, row: usize, channel: usize) -> Option<&T> {
        self.offset(col, row, channel).map(|idx| &self.data[idx])
    }

    /// Get a mutable sample, or `None` when any index is out of range.
    pub fn get_mut(&mut self, col: usize, row: usize, channel: usize) -> Option<&mut T> {
        self.offset(col, row, channel)
            .map(move |idx| &mut self.data[idx])
    }

    /// Get a sample at signed spatial coordinates.
    ///
    /// Returns `None` for any coordinate outside `[0, width) x [0, height)`,
    /// which lets callers implement padding policies without casting.
    #[inline]
    pub fn get_padded(&self, col: isize, row: isize, channel: usize) -> Option<&T> {
        if col < 0 || row < 0 {
            return None;
        }
        self.get(col as usize, row as usize, channel)
    }

    /// Get a sample.
    ///
    /// # Panics
    ///
    /// If any index is out of range.
    pub fn at(&self, col: usize, row: usize, channel: usize) -> &T {
        match self.offset(col, row, channel) {
            Some(idx) => &self.data[idx],
            None => panic!(
                "index ({col}, {row}, {channel}) out of range for {}",
                self.shape
            ),
        }
    }

    /// Get a mutable sample.
    ///
    /// # Panics
    ///
    /// If any index is out of range.
    pub fn at_mut(&mut self, col: usize, row: usize, channel: usize) -> &mut T {
        match self.offset(col, row, channel) {
            Some(idx) => &mut self.data[idx],
            None => panic!(
                "index ({col}, {row}, {channel}) out of range for {}",
                self.shape
            ),
        }
    }

    /// Apply `f` to every sample, producing an image of the same shape.
    pub fn map<U>(&self, f: impl Fn(&T) -> U) -> Image<U> {
        Image {
            shape: self.shape,
            data: self.data.iter().map(f).collect(),
        }
    }

    /// Cast the pixel data of the image to a different type.
    ///
    /// # Errors
    ///
    /// If any sample is not representable in `U`.
    pub fn cast<U>(&self) -> Result<Image<U>, ImageError>
    where
        T: num_traits::ToPrimitive + Copy,
        U: num_traits::NumCast,
    {
        let casted_data = self
            .data
            .iter()
            .map(|&x| U::from(x).ok_or(ImageError::CastError))
            .collect::<Result<Vec<U>, ImageError>>()?;

        Image::new(self.shape, casted_data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_shape() {
        let shape = ImageShape {
            width: 10,
            height: 20,
            channels: 3,
        };
        assert_eq!(shape.num_elements(), 600);
        assert_eq!(<[usize; 3]>::from(shape), [10, 20, 3]);
        assert_eq!(ImageShape::from([10, 20, 3]), shape);
        assert_eq!(
            shape.to_string(),
            "ImageShape { width: 10, height: 20, channels: 3 }"
        );
    }

    #[test]
    fn image_new() -> Result<(), ImageError> {
        let image = Image::<u8>::new([4, 2, 3].into(), vec![0; 24])?;
        assert_eq!(image.width(), 4);
        assert_eq!(image.height(), 2);
        assert_eq!(image.num_channels(), 3);
        assert_eq!(image.as_slice().len(), 24);
        Ok(())
    }

    #[test]
    fn image_new_invalid_length() {
        let res = Image::<u8>::new([4, 2, 3].into(), vec![0; 23]);
        assert_eq!(res, Err(ImageError::InvalidDataLength(23, 24)));
    }

    #[test]
    fn image_shape_overflow() {
        let shape = ImageShape {
            width: usize::MAX / 2,
            height: 3,
            channels: 1,
        };
        assert_eq!(shape.checked_num_elements(), None);
        assert_eq!(shape.num_elements(), usize::MAX);
        assert_eq!(
            Image::<u8>::zeros(shape),
            Err(ImageError::ShapeOverflow(shape))
        );
        assert_eq!(
            Image::<u8>::new(shape, vec![0; 4]),
            Err(ImageError::ShapeOverflow(shape))
        );
    }

    #[test]
    fn image_zeros() -> Result<(), ImageError> {
        let image = Image::<f32>::zeros([3, 3, 2].into())?;
        assert!(image.as_slice().iter().all(|&v| v == 0.0));
        Ok(())
    }

    #[test]
    fn image_empty() -> Result<(), ImageError> {
        let image = Image::<u8>::zeros([0, 5, 1].into())?;
        assert!(image.as_slice().is_empty());
        assert_eq!(image.get(0, 0, 0), None);
        Ok(())
    }

    #[test]
    fn image_indexing() -> Result<(), ImageError> {
        // 3 columns, 2 rows, 2 channels
        #[rustfmt::skip]
        let mut image = Image::<u8>::new(
            [3, 2, 2].into(),
            vec![
                0, 1,  2, 3,  4, 5,
                6, 7,  8, 9, 10, 11,
            ],
        )?;

        assert_eq!(*image.at(0, 0, 1), 1);
        assert_eq!(*image.at(2, 0, 0), 4);
        assert_eq!(*image.at(1, 1, 1), 9);
        assert_eq!(image.get(3, 0, 0), None);
        assert_eq!(image.get(0, 2, 0), None);
        assert_eq!(image.get(0, 0, 2), None);

        assert_eq!(image.get_padded(-1, 0, 0), None);
        assert_eq!(image.get_padded(0, -1, 0), None);
        assert_eq!(image.get_padded(2, 1, 0), Some(&10));

        *image.at_mut(2, 1, 1) = 42;
        assert_eq!(image.as_slice()[11], 42);

        if let Some(v) = image.get_mut(0, 1, 0) {
            *v = 7;
        }
        assert_eq!(*image.at(0, 1, 0), 7);
        Ok(())
    }

    #[test]
    #[should_panic]
    fn image_at_out_of_range() {
        let image = Image::<u8>::from_shape_val([2, 2, 1].into(), 0).unwrap();
        let _ = image.at(2, 0, 0);
    }

    #[test]
    fn image_cast() -> Result<(), ImageError> {
        let image = Image::<u8>::new([2, 1, 1].into(), vec![0, 255])?;
        let image_f32 = image.cast::<f32>()?;
        assert_eq!(image_f32.as_slice(), &[0.0, 255.0]);

        let image_back = image_f32.cast::<u8>()?;
        assert_eq!(image_back, image);

        let negative = Image::<f32>::new([1, 1, 1].into(), vec![-1.0])?;
        assert_eq!(negative.cast::<u8>(), Err(ImageError::CastError));
        Ok(())
    }

    #[test]
    fn image_map() -> Result<(), ImageError> {
        let image = Image::<u8>::new([2, 1, 1].into(), vec![1, 2])?;
        let doubled = image.map(|&v| v as u16 * 2);
        assert_eq!(doubled.shape(), image.shape());
        assert_eq!(doubled.into_vec(), vec![2, 4]);
        Ok(())
    }
}
