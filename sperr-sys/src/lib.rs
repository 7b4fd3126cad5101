//! Unsafe Rust bindings for SPERR - a wavelet-based lossy compressor for scientific floating-point data.
//!
//! The bindings target a small C-linkage shim (`c/sperr_rs.h`) that forwards every call to SPERR's
//! `C_API`. The shim is name-mangling free and adds no logic of its own.
//!
//! ## Features
//! - `openmp`: build SPERR with OpenMP so the `nthreads` arguments of the 3D functions take effect.
//!
//! ## Memory
//! Every buffer SPERR writes to a `dst` out-pointer is allocated with `malloc` and must be released
//! exactly once with [`sperr_rs_free`].
//!
//! ## Error Handling
//! Errors are represented by int codes: `0` success, `1` the `dst` out-pointer was not pointing to
//! NULL, `2` invalid parameters (compression only) and `-1` for anything else.

#[cfg(feature = "openmp")]
use ::openmp_sys as _;

mod c_bridge {
    #![allow(dead_code)]
    #![allow(missing_docs)]
    #![allow(clippy::missing_safety_doc)]
    #![allow(non_snake_case, non_camel_case_types, non_upper_case_globals)]

    include!(concat!(env!("OUT_DIR"), "/bindings.rs"));
}
pub use c_bridge::*;

/// Compression mode code for a fixed bit-per-pixel rate.
pub const SPERR_MODE_BPP: core::ffi::c_int = 1;
/// Compression mode code for a fixed peak signal-to-noise ratio.
pub const SPERR_MODE_PSNR: core::ffi::c_int = 2;
/// Compression mode code for a fixed point-wise (absolute) error.
pub const SPERR_MODE_PWE: core::ffi::c_int = 3;

/// Length of the header prefix of a 2D stream compressed with `out_inc_header = 1`.
pub const SPERR_HEADER_LEN_2D: usize = 10;
