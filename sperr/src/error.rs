/// Errors of the SPERR bindings.
///
/// The codec itself reports failures with a handful of integer status codes that carry no
/// additional information. For debugging purposes, you can set the environment variable
/// `SPERR_TRACE` to get trace prints explaining why the bindings rejected a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Error {
    /// One or more parameters is invalid.
    ///
    /// Reported by the codec (status `2`), or by the bindings before calling the codec, for example
    /// for zero dimensions or a source length that does not match the dimensions.
    InvalidParameter,
    /// The compressed data is too short to contain a header.
    MissingHeader,
    /// The dimensions stored in the compressed data do not match the requested shape.
    ShapeMismatch,
    /// Generic codec failure (status `-1`), e.g. corrupt or truncated streams or allocation failures.
    Failure,
}
impl Error {
    pub(crate) fn from_status(code: core::ffi::c_int) -> Self {
        match code {
            STATUS_INVALID_PARAMETER => Error::InvalidParameter,
            STATUS_FAILURE => Error::Failure,
            STATUS_DST_NOT_NULL => {
                crate::trace!("SPERR rejected a non-NULL dst out-pointer");
                Error::Failure
            }
            unknown => {
                crate::trace!("Unknown SPERR status code: {unknown}");
                Error::Failure
            }
        }
    }
}
impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidParameter => f.write_str("One or more parameters is invalid"),
            Error::MissingHeader => f.write_str("Compressed data is missing the header"),
            Error::ShapeMismatch => f.write_str("Compressed data has a different shape"),
            Error::Failure => f.write_str("Generic failure"),
        }
    }
}
impl std::error::Error for Error {}

const STATUS_OK: core::ffi::c_int = 0;
const STATUS_DST_NOT_NULL: core::ffi::c_int = 1;
const STATUS_INVALID_PARAMETER: core::ffi::c_int = 2;
const STATUS_FAILURE: core::ffi::c_int = -1;

pub(crate) trait ErrorCode: Sized {
    fn into_result(self) -> Result<(), Error>;
}
impl ErrorCode for core::ffi::c_int {
    fn into_result(self) -> Result<(), Error> {
        if self == STATUS_OK {
            Ok(())
        } else {
            Err(Error::from_status(self))
        }
    }
}
