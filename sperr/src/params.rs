use crate::Error;

/// SPERR compression mode and quality target.
///
/// SPERR always targets exactly one quality metric, the meaning of the numeric quality depends on
/// the mode.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum CompressionMode {
    /// Fixed bit-per-pixel rate.
    BitsPerPixel {
        /// Bits per pixel, must be in `0.0 < bpp <= 64.0`.
        bpp: f64,
    },
    /// Fixed peak signal-to-noise ratio.
    PeakSignalToNoiseRatio {
        /// Positive peak signal-to-noise ratio.
        psnr: f64,
    },
    /// Fixed point-wise (absolute) error.
    ///
    /// Every reconstructed value is guaranteed to be within `pwe` of its original value.
    PointwiseError {
        /// Positive point-wise (absolute) error.
        pwe: f64,
    },
}
impl CompressionMode {
    pub(crate) const fn as_mode(self) -> core::ffi::c_int {
        match self {
            Self::BitsPerPixel { .. } => sperr_sys::SPERR_MODE_BPP,
            Self::PeakSignalToNoiseRatio { .. } => sperr_sys::SPERR_MODE_PSNR,
            Self::PointwiseError { .. } => sperr_sys::SPERR_MODE_PWE,
        }
    }

    pub(crate) const fn as_quality(self) -> f64 {
        match self {
            Self::BitsPerPixel { bpp: quality }
            | Self::PeakSignalToNoiseRatio { psnr: quality }
            | Self::PointwiseError { pwe: quality } => quality,
        }
    }

    pub(crate) fn validate(self) -> Result<Self, Error> {
        let quality = self.as_quality();
        let valid = match self {
            Self::BitsPerPixel { bpp } => bpp > 0.0 && bpp <= 64.0,
            Self::PeakSignalToNoiseRatio { psnr } => psnr > 0.0 && psnr.is_finite(),
            Self::PointwiseError { pwe } => pwe > 0.0 && pwe.is_finite(),
        };
        if !valid {
            crate::trace!("Invalid quality {quality} for {self:?}");
            return Err(Error::InvalidParameter);
        }
        Ok(self)
    }
}

/// Compression parameters for 3D volumes, used by [`compress_3d`](crate::compress_3d).
///
/// A volume is split into chunks which are compressed independently, possibly in parallel.
/// The output does not depend on the number of threads.
#[derive(Debug, Clone, PartialEq)]
pub struct CParams {
    mode: CompressionMode,
    chunks: [usize; 3],
    nthreads: usize,
}
impl CParams {
    /// Create new parameters with the given compression mode.
    pub fn new(mode: CompressionMode) -> Self {
        Self {
            mode,
            chunks: [256; 3],
            nthreads: 1,
        }
    }

    /// Set the compression mode.
    pub fn mode(&mut self, mode: CompressionMode) -> &mut Self {
        self.mode = mode;
        self
    }
    /// Get the compression mode currently set in the parameters.
    pub fn get_mode(&self) -> CompressionMode {
        self.mode
    }

    /// Set the preferred chunk shape `[chunk_x, chunk_y, chunk_z]`.
    ///
    /// The chunks do not need to divide the volume, boundary chunks are adjusted by the codec.
    ///
    /// By default, the chunk shape is `[256, 256, 256]`.
    pub fn chunks(&mut self, chunks: [usize; 3]) -> Result<&mut Self, Error> {
        if chunks.contains(&0) {
            crate::trace!("Chunk shape {chunks:?} must not contain zeros");
            return Err(Error::InvalidParameter);
        }
        self.chunks = chunks;
        Ok(self)
    }
    /// Get the chunk shape currently set in the parameters.
    pub fn get_chunks(&self) -> [usize; 3] {
        self.chunks
    }

    /// Set the number of threads to use for compression.
    ///
    /// This is only a hint, forwarded to the codec as is. `0` lets SPERR use all available OpenMP
    /// threads. It takes effect only if SPERR was built with OpenMP (the `openmp` feature).
    ///
    /// By default, the number of threads is set to 1.
    pub fn nthreads(&mut self, nthreads: usize) -> &mut Self {
        self.nthreads = nthreads;
        self
    }
    /// Get the number of threads currently set in the parameters.
    pub fn get_nthreads(&self) -> usize {
        self.nthreads
    }
}

/// Decompression parameters for 3D volumes, used by [`decompress_3d`](crate::decompress_3d).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DParams {
    nthreads: usize,
}
impl Default for DParams {
    fn default() -> Self {
        Self { nthreads: 1 }
    }
}
impl DParams {
    /// Set the number of threads to use for decompression.
    ///
    /// `0` lets SPERR use all available OpenMP threads.
    ///
    /// By default, the number of threads is set to 1.
    pub fn nthreads(&mut self, nthreads: usize) -> &mut Self {
        self.nthreads = nthreads;
        self
    }
    /// Get the number of threads currently set in the parameters.
    pub fn get_nthreads(&self) -> usize {
        self.nthreads
    }
}

#[cfg(test)]
mod tests {
    use super::{CParams, CompressionMode, DParams};
    use crate::Error;

    #[test]
    fn mode_codes() {
        let bpp = CompressionMode::BitsPerPixel { bpp: 2.5 };
        assert_eq!(1, bpp.as_mode());
        assert_eq!(2.5, bpp.as_quality());
        let psnr = CompressionMode::PeakSignalToNoiseRatio { psnr: 90.0 };
        assert_eq!(2, psnr.as_mode());
        assert_eq!(90.0, psnr.as_quality());
        let pwe = CompressionMode::PointwiseError { pwe: 1e-4 };
        assert_eq!(3, pwe.as_mode());
        assert_eq!(1e-4, pwe.as_quality());
    }

    #[test]
    fn mode_validation() {
        for valid in [
            CompressionMode::BitsPerPixel { bpp: 64.0 },
            CompressionMode::BitsPerPixel { bpp: 0.1 },
            CompressionMode::PeakSignalToNoiseRatio { psnr: 100.0 },
            CompressionMode::PointwiseError { pwe: 1e-9 },
        ] {
            assert_eq!(Ok(valid), valid.validate());
        }
        for invalid in [
            CompressionMode::BitsPerPixel { bpp: 0.0 },
            CompressionMode::BitsPerPixel { bpp: 64.5 },
            CompressionMode::BitsPerPixel { bpp: f64::NAN },
            CompressionMode::PeakSignalToNoiseRatio { psnr: -1.0 },
            CompressionMode::PeakSignalToNoiseRatio { psnr: f64::INFINITY },
            CompressionMode::PointwiseError { pwe: 0.0 },
            CompressionMode::PointwiseError { pwe: f64::NAN },
        ] {
            assert_eq!(Err(Error::InvalidParameter), invalid.validate());
        }
    }

    #[test]
    fn params_builders() {
        let mut cparams = CParams::new(CompressionMode::PointwiseError { pwe: 0.5 });
        assert_eq!([256; 3], cparams.get_chunks());
        assert_eq!(1, cparams.get_nthreads());

        cparams.chunks([32, 16, 8]).unwrap().nthreads(0);
        assert_eq!([32, 16, 8], cparams.get_chunks());
        assert_eq!(0, cparams.get_nthreads());
        assert_eq!(Err(Error::InvalidParameter), cparams.chunks([0, 16, 8]).map(|_| ()));

        let mut dparams = DParams::default();
        assert_eq!(1, dparams.get_nthreads());
        assert_eq!(4, dparams.nthreads(4).get_nthreads());
        assert_eq!(0, dparams.nthreads(0).get_nthreads());
    }
}
