use crate::element::is_float;
use crate::error::ErrorCode;
use crate::util::DstPtr;
use crate::{CParams, CompressionMode, Element, Error, FfiVec, HEADER_LEN_2D};

/// Check that `dims` are non-zero and describe exactly `len` elements.
pub(crate) fn check_dims(len: usize, dims: &[usize]) -> Result<(), Error> {
    let num_elements = num_elements(dims)?;
    if num_elements != len {
        crate::trace!(
            "Source of {len} elements does not match dimensions {dims:?} ({num_elements} elements)"
        );
        return Err(Error::InvalidParameter);
    }
    Ok(())
}

/// The number of elements described by non-zero `dims`.
pub(crate) fn num_elements(dims: &[usize]) -> Result<usize, Error> {
    if dims.contains(&0) {
        crate::trace!("Dimensions {dims:?} must not contain zeros");
        return Err(Error::InvalidParameter);
    }
    dims.iter()
        .try_fold(1usize, |acc, &d| acc.checked_mul(d))
        .ok_or_else(|| {
            crate::trace!("Dimensions {dims:?} overflow");
            Error::InvalidParameter
        })
}

/// Compress a 2D field of data.
///
/// # Arguments
///
/// * `src` - The field, `dimx * dimy` elements with `x` varying fastest.
/// * `dims` - The dimensions `[dimx, dimy]`, both non-zero.
/// * `mode` - The compression mode and quality target.
/// * `include_header` - Whether to prefix the stream with a header of [`HEADER_LEN_2D`] bytes,
///   making it self-describing (see [`parse_header`](crate::parse_header) and
///   [`decompress_2d_with_header`](crate::decompress_2d_with_header)).
///
/// # Returns
///
/// The compressed stream.
///
/// # Errors
///
/// [`Error::InvalidParameter`] if the dimensions or the quality are invalid, in which case the
/// codec is not called, or if the codec rejects the parameters. [`Error::Failure`] for any other
/// codec failure.
pub fn compress_2d<T: Element>(
    src: &[T],
    dims: [usize; 2],
    mode: CompressionMode,
    include_header: bool,
) -> Result<FfiVec<u8>, Error> {
    check_dims(src.len(), &dims)?;
    let mode = mode.validate()?;

    let mut dst = DstPtr::new();
    let mut dst_len = 0;
    unsafe {
        sperr_sys::sperr_rs_comp_2d(
            src.as_ptr().cast(),
            is_float::<T>(),
            dims[0],
            dims[1],
            mode.as_mode(),
            mode.as_quality(),
            include_header as _,
            dst.as_out(),
            &mut dst_len,
        )
        .into_result()?;
        dst.into_ffi_vec(dst_len)
    }
}

/// Compress a 3D volume of data.
///
/// The volume is split into chunks of the shape set in `params`, each compressed independently.
/// The stream always starts with a header, see [`parse_header`](crate::parse_header).
///
/// # Arguments
///
/// * `src` - The volume, `dimx * dimy * dimz` elements with `x` varying fastest and `z` slowest.
/// * `dims` - The dimensions `[dimx, dimy, dimz]`, all non-zero.
/// * `params` - Compression mode, chunk shape and number of threads.
///
/// # Returns
///
/// The compressed stream. It is identical for any number of threads.
///
/// # Errors
///
/// Same as [`compress_2d`].
pub fn compress_3d<T: Element>(
    src: &[T],
    dims: [usize; 3],
    params: &CParams,
) -> Result<FfiVec<u8>, Error> {
    check_dims(src.len(), &dims)?;
    let mode = params.get_mode().validate()?;
    let chunks = params.get_chunks();

    let mut dst = DstPtr::new();
    let mut dst_len = 0;
    unsafe {
        sperr_sys::sperr_rs_comp_3d(
            src.as_ptr().cast(),
            is_float::<T>(),
            dims[0],
            dims[1],
            dims[2],
            chunks[0],
            chunks[1],
            chunks[2],
            mode.as_mode(),
            mode.as_quality(),
            params.get_nthreads(),
            dst.as_out(),
            &mut dst_len,
        )
        .into_result()?;
        dst.into_ffi_vec(dst_len)
    }
}

/// Truncate a 3D stream, keeping `pct` percent of each chunk's bitstream.
///
/// SPERR streams are progressive, a truncated stream is still valid and decompresses to a lower
/// quality reconstruction of the same volume.
///
/// # Arguments
///
/// * `stream` - A stream produced by [`compress_3d`].
/// * `pct` - The percentage to keep, in range `[1, 100]`.
pub fn truncate_3d(stream: &[u8], pct: u32) -> Result<FfiVec<u8>, Error> {
    if !(1..=100).contains(&pct) {
        crate::trace!("Truncation percentage {pct} is not in [1, 100]");
        return Err(Error::InvalidParameter);
    }
    if stream.len() < HEADER_LEN_2D {
        crate::trace!("Stream of {} bytes is missing the header", stream.len());
        return Err(Error::MissingHeader);
    }

    let mut dst = DstPtr::new();
    let mut dst_len = 0;
    unsafe {
        sperr_sys::sperr_rs_trunc_3d(
            stream.as_ptr().cast(),
            stream.len(),
            pct as _,
            dst.as_out(),
            &mut dst_len,
        )
        .into_result()?;
        dst.into_ffi_vec(dst_len)
    }
}
