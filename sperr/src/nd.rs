//! Conversions between SPERR streams and arrays of the `ndarray` crate.
//!
//! Arrays are handled in standard (row-major) layout, so the last axis varies fastest: a 2D array
//! of shape `(dimy, dimx)` and a 3D array of shape `(dimz, dimy, dimx)`. Non-standard layouts are
//! copied into standard layout before compression.
//!
//! ```no_run
//! use sperr::CompressionMode;
//!
//! let field = ndarray::Array2::<f32>::from_shape_fn((64, 128), |(y, x)| (x * y) as f32);
//! let mode = CompressionMode::PointwiseError { pwe: 1e-3 };
//!
//! let compressed = sperr::nd::compress_2d(field.view(), mode).unwrap();
//!
//! let mut decompressed = ndarray::Array2::<f32>::zeros((64, 128));
//! sperr::nd::decompress_into_2d(&compressed, decompressed.view_mut()).unwrap();
//! ```

use ndarray::{ArrayView2, ArrayView3, ArrayViewMut2, ArrayViewMut3};

use crate::{CParams, CompressionMode, DParams, Element, Error, FfiVec};

/// Compress a 2D array into a self-describing stream (with header).
pub fn compress_2d<T: Element>(
    src: ArrayView2<T>,
    mode: CompressionMode,
) -> Result<FfiVec<u8>, Error> {
    let src = src.as_standard_layout();
    let (dimy, dimx) = src.dim();
    let data = src.as_slice().ok_or(Error::Failure)?;
    crate::compress_2d(data, [dimx, dimy], mode, true)
}

/// Decompress a 2D stream with header into `decompressed`.
///
/// # Errors
///
/// [`Error::ShapeMismatch`] if the array's shape differs from the stream's, and the errors of
/// [`decompress_2d_with_header`](crate::decompress_2d_with_header).
pub fn decompress_into_2d<T: Element>(
    stream: &[u8],
    mut decompressed: ArrayViewMut2<T>,
) -> Result<(), Error> {
    let (dimy, dimx) = decompressed.dim();
    let header = crate::parse_header(stream)?;
    if header.dims() != [dimx, dimy, 1] {
        crate::trace!(
            "Stream dimensions {:?} do not match array shape {:?}",
            header.dims(),
            decompressed.shape()
        );
        return Err(Error::ShapeMismatch);
    }

    let (_, dec) = crate::decompress_2d_with_header::<T>(stream)?;
    let dec = ArrayView2::from_shape((dimy, dimx), dec.as_slice()).map_err(|_| Error::Failure)?;
    decompressed.assign(&dec);
    Ok(())
}

/// Compress a 3D array.
pub fn compress_3d<T: Element>(src: ArrayView3<T>, params: &CParams) -> Result<FfiVec<u8>, Error> {
    let src = src.as_standard_layout();
    let (dimz, dimy, dimx) = src.dim();
    let data = src.as_slice().ok_or(Error::Failure)?;
    crate::compress_3d(data, [dimx, dimy, dimz], params)
}

/// Decompress a 3D stream into `decompressed`.
///
/// # Errors
///
/// [`Error::ShapeMismatch`] if the array's shape differs from the stream's, and the errors of
/// [`decompress_3d`](crate::decompress_3d).
pub fn decompress_into_3d<T: Element>(
    stream: &[u8],
    mut decompressed: ArrayViewMut3<T>,
    params: &DParams,
) -> Result<(), Error> {
    let (dimz, dimy, dimx) = decompressed.dim();
    let header = crate::parse_header(stream)?;
    if header.dims() != [dimx, dimy, dimz] {
        crate::trace!(
            "Stream dimensions {:?} do not match array shape {:?}",
            header.dims(),
            decompressed.shape()
        );
        return Err(Error::ShapeMismatch);
    }

    let (_, dec) = crate::decompress_3d::<T>(stream, params)?;
    let dec =
        ArrayView3::from_shape((dimz, dimy, dimx), dec.as_slice()).map_err(|_| Error::Failure)?;
    decompressed.assign(&dec);
    Ok(())
}
