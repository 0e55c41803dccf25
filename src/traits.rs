use core::fmt::Debug;
use num_traits::{Float, Num, One, Zero};

/// Trait for numeric element types.
///
/// Blanket-implemented for all types satisfying the bounds.
pub trait Scalar: Copy + PartialEq + PartialOrd + Debug + Zero + One + Num {}

impl<T: Copy + PartialEq + PartialOrd + Debug + Zero + One + Num> Scalar for T {}

/// Trait for real floating-point types (`f32`, `f64`).
///
/// Required by the special functions and the distributions, which need
/// `exp`, `ln`, `sqrt` and IEEE infinities.
pub trait FloatScalar: Scalar + Float + Send + Sync + 'static {
    /// Convert an `f64` constant into `Self`.
    ///
    /// Lossless for `f64`; rounds to nearest for `f32`.
    fn lit(v: f64) -> Self;
}

macro_rules! impl_float_scalar {
    ($($t:ty),*) => {
        $(
            impl FloatScalar for $t {
                #[inline]
                fn lit(v: f64) -> $t {
                    v as $t
                }
            }
        )*
    };
}

impl_float_scalar!(f32, f64);
