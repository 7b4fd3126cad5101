/// Marker trait for element types that can be compressed with SPERR.
///
/// Implemented for `f32` and `f64`. The trait is sealed, SPERR only understands these two.
pub trait Element: sealed::Element {}

impl Element for f32 {}
impl sealed::Element for f32 {
    const IS_FLOAT: bool = true;
}

impl Element for f64 {}
impl sealed::Element for f64 {
    const IS_FLOAT: bool = false;
}

pub(crate) mod sealed {
    pub trait Element: Copy + Send + Sync + 'static {
        /// `true` for single precision, matching the codec's `is_float` flag.
        const IS_FLOAT: bool;
    }
}

pub(crate) const fn is_float<T: Element>() -> core::ffi::c_int {
    <T as sealed::Element>::IS_FLOAT as core::ffi::c_int
}
