use crate::Error;

/// Length of the header prefix of 2D streams compressed with a header.
pub const HEADER_LEN_2D: usize = sperr_sys::SPERR_HEADER_LEN_2D;

// The codec reads a fixed prefix whose length depends on the stream kind. Parsing from a zero padded
// copy keeps it from reading past short inputs.
const HEADER_SCRATCH_LEN: usize = 64;

/// The header of a SPERR compressed stream.
///
/// 2D streams carry a header only if they were compressed with `include_header`, 3D streams always
/// carry one. See [`parse_header`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Header {
    dims: [usize; 3],
    is_float: bool,
}
impl Header {
    /// The dimensions `[dimx, dimy, dimz]` of the compressed data, `dimx` varying fastest.
    ///
    /// For 2D data `dimz` is 1.
    pub fn dims(&self) -> [usize; 3] {
        self.dims
    }

    /// Whether the original data was single precision (`f32`) rather than `f64`.
    pub fn is_float(&self) -> bool {
        self.is_float
    }

    /// The number of elements of the compressed data.
    pub fn num_elements(&self) -> usize {
        self.dims.iter().product()
    }
}

/// Parse the header of a compressed stream without decompressing it.
///
/// The stream must start with a header: a 3D stream, or a 2D stream compressed with
/// `include_header`. The remainder of the stream is not validated, and a stream without a header
/// produces meaningless dimensions.
///
/// # Errors
///
/// [`Error::MissingHeader`] if the stream is too short to contain a header.
pub fn parse_header(stream: &[u8]) -> Result<Header, Error> {
    if stream.len() < HEADER_LEN_2D {
        crate::trace!(
            "Stream of {} bytes is shorter than a header ({} bytes)",
            stream.len(),
            HEADER_LEN_2D
        );
        return Err(Error::MissingHeader);
    }

    let mut scratch = [0u8; HEADER_SCRATCH_LEN];
    let prefix_len = stream.len().min(HEADER_SCRATCH_LEN);
    scratch[..prefix_len].copy_from_slice(&stream[..prefix_len]);

    let mut dims = [0usize; 3];
    let mut is_float = 0;
    let [dimx, dimy, dimz] = &mut dims;
    unsafe {
        sperr_sys::sperr_rs_parse_header(scratch.as_ptr().cast(), dimx, dimy, dimz, &mut is_float)
    };
    Ok(Header {
        dims,
        is_float: is_float != 0,
    })
}
