use num::{Float, NumCast, Zero};
use rand::distributions::uniform::SampleUniform;
use std::{
    fmt::{Debug, Display, LowerExp},
    iter::Sum,
    ops::{Add, AddAssign, Sub, SubAssign},
};

/// Floating-point primitive the engine can calculate with.
///
/// The dataset's primitive is also the primitive used for all internal
/// distance calculations and for the returned centroids.
pub trait Primitive:
    Add + AddAssign + Sum + Sub + SubAssign + Zero + Float + NumCast + SampleUniform
    + PartialOrd + Copy + Default + Display + Debug + Sync + Send + LowerExp + 'static
    + for<'a> AddAssign<&'a Self>
{
}
impl Primitive for f32 {}
impl Primitive for f64 {}
