#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

//! Rust bindings for SPERR - a wavelet-based lossy compressor for scientific floating-point data.
//!
//! Provide a safe interface to the [SPERR](https://github.com/NCAR/SPERR) library. SPERR compresses
//! 2D fields and 3D volumes of `f32` or `f64` values, targeting either a fixed bit rate, a peak
//! signal-to-noise ratio, or a point-wise error bound.
//!
//! ### Getting Started
//!
//! ```no_run
//! use sperr::{CParams, CompressionMode, DParams};
//!
//! // A 64x32x16 volume, x varies fastest
//! let dims = [64, 32, 16];
//! let volume: Vec<f64> = (0..64 * 32 * 16).map(|i| (i as f64 * 0.01).sin()).collect();
//!
//! let mut cparams = CParams::new(CompressionMode::PointwiseError { pwe: 1e-6 });
//! cparams.chunks([32, 32, 16]).unwrap().nthreads(4);
//! let compressed = sperr::compress_3d(&volume, dims, &cparams).unwrap();
//!
//! // The stream is self-describing
//! assert_eq!(dims, sperr::parse_header(&compressed).unwrap().dims());
//!
//! let (out_dims, decompressed) =
//!     sperr::decompress_3d::<f64>(&compressed, &DParams::default()).unwrap();
//! assert_eq!(dims, out_dims);
//! assert!(volume
//!     .iter()
//!     .zip(decompressed.iter())
//!     .all(|(a, b)| (a - b).abs() <= 1e-6));
//! ```
//!
//! All outputs are returned as [`FfiVec`], a buffer allocated by SPERR that is released when
//! dropped.
//!
//! ## Features
//! - `openmp`: Build SPERR with OpenMP, so the number of threads set in [`CParams`] and
//!   [`DParams`] takes effect.
//! - `ndarray`: Compress and decompress arrays of the `ndarray` crate, see the [`nd`] module.
//!
//! ## Error Handling
//! SPERR reports failures with status codes that carry no additional information. If the
//! environment variable `SPERR_TRACE` is set, the bindings print a trace explaining why they
//! rejected a call, which is useful for debugging.

mod params;
pub use params::*;

mod element;
pub use element::Element;

mod encode;
pub use encode::{compress_2d, compress_3d, truncate_3d};

mod decode;
pub use decode::{decompress_2d, decompress_2d_with_header, decompress_3d};

mod header;
pub use header::{parse_header, Header, HEADER_LEN_2D};

mod util;
pub use util::FfiVec;

#[cfg(feature = "ndarray")]
pub mod nd;

mod error;
pub use error::Error;

mod tracing;
pub(crate) use tracing::trace;

/// The version of the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(feature = "ndarray")]
pub use ndarray;
