use crate::element::is_float;
use crate::encode::num_elements;
use crate::error::ErrorCode;
use crate::util::DstPtr;
use crate::{parse_header, DParams, Element, Error, FfiVec, HEADER_LEN_2D};

/// Decompress a 2D stream compressed without a header.
///
/// The element type `T` of the output is independent of the precision the data was compressed
/// from.
///
/// # Arguments
///
/// * `stream` - A stream produced by [`compress_2d`](crate::compress_2d) with
///   `include_header = false`.
/// * `dims` - The dimensions `[dimx, dimy]` the stream was compressed with.
///
/// # Returns
///
/// The reconstructed field, `dimx * dimy` elements with `x` varying fastest.
///
/// # Errors
///
/// [`Error::InvalidParameter`] for zero dimensions and [`Error::Failure`] for empty, corrupt or
/// mismatching streams.
pub fn decompress_2d<T: Element>(stream: &[u8], dims: [usize; 2]) -> Result<FfiVec<T>, Error> {
    let len = num_elements(&dims)?;
    if stream.is_empty() {
        crate::trace!("Cannot decompress an empty stream");
        return Err(Error::Failure);
    }

    let mut dst = DstPtr::new();
    unsafe {
        sperr_sys::sperr_rs_decomp_2d(
            stream.as_ptr().cast(),
            stream.len(),
            is_float::<T>(),
            dims[0],
            dims[1],
            dst.as_out(),
        )
        .into_result()?;
        dst.into_ffi_vec(len)
    }
}

/// Decompress a self-describing 2D stream, compressed with a header.
///
/// # Returns
///
/// The dimensions `[dimx, dimy]` read from the header and the reconstructed field.
///
/// # Errors
///
/// [`Error::MissingHeader`] if the stream is too short, [`Error::ShapeMismatch`] if the header
/// describes a 3D volume, and the errors of [`decompress_2d`].
pub fn decompress_2d_with_header<T: Element>(
    stream: &[u8],
) -> Result<([usize; 2], FfiVec<T>), Error> {
    let header = parse_header(stream)?;
    let [dimx, dimy, dimz] = header.dims();
    if dimz != 1 {
        crate::trace!("Expected a 2D stream, header describes {:?}", header.dims());
        return Err(Error::ShapeMismatch);
    }
    let dims = [dimx, dimy];
    let decompressed = decompress_2d(&stream[HEADER_LEN_2D..], dims)?;
    Ok((dims, decompressed))
}

/// Decompress a 3D stream.
///
/// The element type `T` of the output is independent of the precision the data was compressed
/// from.
///
/// # Returns
///
/// The dimensions `[dimx, dimy, dimz]` recovered from the stream and the reconstructed volume,
/// with `x` varying fastest and `z` slowest.
pub fn decompress_3d<T: Element>(
    stream: &[u8],
    params: &DParams,
) -> Result<([usize; 3], FfiVec<T>), Error> {
    if stream.len() < HEADER_LEN_2D {
        crate::trace!("Stream of {} bytes is missing the header", stream.len());
        return Err(Error::MissingHeader);
    }

    let mut dst = DstPtr::new();
    let mut dims = [0usize; 3];
    let [dimx, dimy, dimz] = &mut dims;
    unsafe {
        sperr_sys::sperr_rs_decomp_3d(
            stream.as_ptr().cast(),
            stream.len(),
            is_float::<T>(),
            params.get_nthreads(),
            dimx,
            dimy,
            dimz,
            dst.as_out(),
        )
        .into_result()?;
    }
    let len = num_elements(&dims).map_err(|_| Error::Failure)?;
    let decompressed = unsafe { dst.into_ffi_vec(len)? };
    Ok((dims, decompressed))
}

#[cfg(test)]
mod tests {
    use rand::prelude::*;

    use super::{decompress_2d, decompress_2d_with_header, decompress_3d};
    use crate::util::tests::{rand_dim, rand_field};
    use crate::{compress_2d, compress_3d, CParams, CompressionMode, DParams, Element, Error};

    fn max_error<T: Element + Into<f64>, U: Element + Into<f64>>(a: &[T], b: &[U]) -> f64 {
        assert_eq!(a.len(), b.len());
        a.iter()
            .zip(b)
            .map(|(&a, &b)| (a.into() - b.into()).abs())
            .fold(0.0, f64::max)
    }

    // Single precision outputs are rounded after reconstruction.
    const F32_SLACK: f64 = 1e-4;

    #[test]
    fn round_trip_2d() {
        let mut rand = StdRng::seed_from_u64(0x7e21c4a9053fd8b6);
        for _ in 0..20 {
            let dims = [rand_dim(&mut rand), rand_dim(&mut rand)];
            let pwe = rand.random_range(1e-3..1.0);
            let mode = CompressionMode::PointwiseError { pwe };

            if rand.random_bool(0.5) {
                let src = rand_field::<f32>(dims[0] * dims[1], &mut rand);
                let compressed = compress_2d(&src, dims, mode, false).unwrap();
                let decompressed = decompress_2d::<f32>(&compressed, dims).unwrap();
                assert!(max_error(&src, &decompressed) <= pwe + F32_SLACK);
            } else {
                let src = rand_field::<f64>(dims[0] * dims[1], &mut rand);
                let compressed = compress_2d(&src, dims, mode, false).unwrap();
                let decompressed = decompress_2d::<f64>(&compressed, dims).unwrap();
                assert!(max_error(&src, &decompressed) <= pwe);
            }
        }
    }

    #[test]
    fn round_trip_2d_with_header() {
        let mut rand = StdRng::seed_from_u64(0x0f6d93b2e8c4175a);
        for _ in 0..10 {
            let dims = [rand_dim(&mut rand), rand_dim(&mut rand)];
            let src = rand_field::<f64>(dims[0] * dims[1], &mut rand);
            let mode = CompressionMode::PointwiseError { pwe: 0.01 };

            let compressed = compress_2d(&src, dims, mode, true).unwrap();
            let (out_dims, decompressed) = decompress_2d_with_header::<f64>(&compressed).unwrap();
            assert_eq!(dims, out_dims);
            assert!(max_error(&src, &decompressed) <= 0.01);
        }
    }

    #[test]
    fn output_precision() {
        let mut rand = StdRng::seed_from_u64(0xb3a85f1c7d2e6049);
        let dims = [24, 30];
        let src = rand_field::<f64>(dims[0] * dims[1], &mut rand);
        let mode = CompressionMode::PointwiseError { pwe: 0.1 };

        let compressed = compress_2d(&src, dims, mode, false).unwrap();
        let as_f32 = decompress_2d::<f32>(&compressed, dims).unwrap();
        let as_f64 = decompress_2d::<f64>(&compressed, dims).unwrap();
        assert!(max_error(&src, &as_f32) <= 0.1 + F32_SLACK);
        assert!(max_error(&as_f64, &as_f32) <= F32_SLACK);
    }

    #[test]
    fn psnr_2d() {
        let mut rand = StdRng::seed_from_u64(0x45c9e2d07a1b8f63);
        let dims = [40, 40];
        let src = rand_field::<f64>(dims[0] * dims[1], &mut rand);
        let mode = CompressionMode::PeakSignalToNoiseRatio { psnr: 60.0 };

        let compressed = compress_2d(&src, dims, mode, false).unwrap();
        let decompressed = decompress_2d::<f64>(&compressed, dims).unwrap();
        let range = src.iter().cloned().fold(f64::MIN, f64::max)
            - src.iter().cloned().fold(f64::MAX, f64::min);
        let mse = src
            .iter()
            .zip(decompressed.iter())
            .map(|(a, b)| (a - b) * (a - b))
            .sum::<f64>()
            / src.len() as f64;
        // 60dB is an rmse of range * 1e-3, the target is approximate so allow 20dB below it
        assert!(mse.sqrt() <= range * 1e-2);
    }

    #[test]
    fn round_trip_3d() {
        let mut rand = StdRng::seed_from_u64(0xd18f4b6a2c70e593);
        for _ in 0..5 {
            let dims = [
                rand_dim(&mut rand),
                rand_dim(&mut rand),
                rand_dim(&mut rand),
            ];
            let pwe = rand.random_range(1e-2..1.0);
            let mut cparams = CParams::new(CompressionMode::PointwiseError { pwe });
            cparams
                .chunks([
                    rand.random_range(8..32),
                    rand.random_range(8..32),
                    rand.random_range(8..32),
                ])
                .unwrap()
                .nthreads(rand.random_range(1..4));
            let mut dparams = DParams::default();
            dparams.nthreads(rand.random_range(1..4));

            let src = rand_field::<f32>(dims.iter().product(), &mut rand);
            let compressed = compress_3d(&src, dims, &cparams).unwrap();
            let (out_dims, decompressed) = decompress_3d::<f32>(&compressed, &dparams).unwrap();
            assert_eq!(dims, out_dims);
            assert!(max_error(&src, &decompressed) <= pwe + F32_SLACK);
        }
    }

    #[test]
    fn header_mismatch() {
        let dims = [16, 16, 4];
        let src = vec![3.0_f64; dims.iter().product()];
        let params = CParams::new(CompressionMode::PointwiseError { pwe: 0.1 });
        let compressed = compress_3d(&src, dims, &params).unwrap();
        assert_eq!(
            Error::ShapeMismatch,
            decompress_2d_with_header::<f64>(&compressed).unwrap_err()
        );
    }

    #[test]
    fn invalid_streams() {
        assert_eq!(
            Error::Failure,
            decompress_2d::<f32>(&[], [4, 4]).unwrap_err()
        );
        assert_eq!(
            Error::InvalidParameter,
            decompress_2d::<f32>(&[1, 2, 3], [0, 4]).unwrap_err()
        );
        assert_eq!(
            Error::MissingHeader,
            decompress_2d_with_header::<f32>(&[1, 2, 3]).unwrap_err()
        );
        assert_eq!(
            Error::MissingHeader,
            decompress_3d::<f64>(&[], &DParams::default()).unwrap_err()
        );
    }
}
