use num_traits::Zero;

/// Sample types that can be fed to and produced by the convolution engine.
///
/// Every sample is widened to `f32` before being weighted, and the `f32`
/// accumulator is converted back once per output sample.
///
/// Integer types round to the nearest value (ties away from zero) and then
/// saturate to their range; `NaN` becomes zero. Float types are plain casts.
pub trait FilterSample: Copy + Zero {
    /// Convert the sample to the accumulator type.
    fn to_f32(&self) -> f32;

    /// Convert an accumulated value to the sample type.
    fn from_f32(val: f32) -> Self;
}

impl FilterSample for f32 {
    fn to_f32(&self) -> f32 {
        *self
    }

    fn from_f32(val: f32) -> Self {
        val
    }
}

impl FilterSample for f64 {
    fn to_f32(&self) -> f32 {
        *self as f32
    }

    fn from_f32(val: f32) -> Self {
        val as f64
    }
}

macro_rules! impl_integer_sample {
    ($($t:ty),*) => {
        $(
            impl FilterSample for $t {
                fn to_f32(&self) -> f32 {
                    *self as f32
                }

                fn from_f32(val: f32) -> Self {
                    // float to int `as` saturates and maps NaN to 0
                    val.round() as $t
                }
            }
        )*
    };
}

impl_integer_sample!(u8, u16, i16, i32);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u8_rounds_to_nearest() {
        assert_eq!(u8::from_f32(1.4), 1);
        assert_eq!(u8::from_f32(1.5), 2);
        assert_eq!(u8::from_f32(254.6), 255);
    }

    #[test]
    fn test_u8_saturates() {
        assert_eq!(u8::from_f32(-3.0), 0);
        assert_eq!(u8::from_f32(300.0), 255);
        assert_eq!(u8::from_f32(f32::NAN), 0);
    }

    #[test]
    fn test_signed_rounding() {
        assert_eq!(i16::from_f32(-1.5), -2);
        assert_eq!(i16::from_f32(-40000.0), i16::MIN);
        assert_eq!(i32::from_f32(-0.4), 0);
    }

    #[test]
    fn test_u16_widen_narrow() {
        let v: u16 = 1234;
        assert_eq!(u16::from_f32(v.to_f32()), v);
        assert_eq!(u16::from_f32(70000.0), u16::MAX);
    }

    #[test]
    fn test_float_passthrough() {
        assert_eq!(f32::from_f32(-0.25), -0.25);
        assert_eq!(f64::from_f32(0.5), 0.5);
        assert_eq!(2.5f64.to_f32(), 2.5f32);
    }
}
