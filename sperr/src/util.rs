//! Owned buffers allocated by the codec.

use std::ffi::c_void;
use std::ptr::NonNull;

use crate::Error;

/// A buffer allocated by the SPERR library and owned by Rust.
///
/// All compression and decompression functions of this crate return their output as an `FfiVec`,
/// avoiding a copy into a Rust allocation. The buffer is released exactly once, when the `FfiVec`
/// is dropped, through the same library that allocated it.
///
/// Use [`FfiVec::into_vec`] if a [`Vec`] is required.
pub struct FfiVec<T> {
    ptr: NonNull<T>,
    len: usize,
}
impl<T> FfiVec<T> {
    /// # Safety
    ///
    /// `ptr` must point to `len` initialized elements allocated by SPERR, and must not be owned by
    /// anything else.
    pub(crate) unsafe fn from_raw_parts(ptr: NonNull<T>, len: usize) -> Self {
        Self { ptr, len }
    }

    /// Get the elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    /// Get the elements as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }

    /// The number of elements in the buffer.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the buffer contains no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Copy the elements into a new `Vec` and release the library allocation.
    pub fn into_vec(self) -> Vec<T>
    where
        T: Clone,
    {
        self.as_slice().to_vec()
    }
}
impl<T> Drop for FfiVec<T> {
    fn drop(&mut self) {
        unsafe { sperr_sys::sperr_rs_free(self.ptr.as_ptr().cast()) };
    }
}
impl<T> std::ops::Deref for FfiVec<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}
impl<T> std::ops::DerefMut for FfiVec<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}
impl<T> AsRef<[T]> for FfiVec<T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}
impl<T: std::fmt::Debug> std::fmt::Debug for FfiVec<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}
// SAFETY: a uniquely owned heap allocation, like `Vec<T>`
unsafe impl<T: Send> Send for FfiVec<T> {}
unsafe impl<T: Sync> Sync for FfiVec<T> {}

/// A `dst` out-pointer handed to the codec.
///
/// Whatever the codec leaves behind is released on drop, unless ownership was taken with
/// [`DstPtr::into_ffi_vec`]. This keeps error paths from leaking partially constructed outputs.
pub(crate) struct DstPtr(*mut c_void);
impl DstPtr {
    pub(crate) fn new() -> Self {
        Self(std::ptr::null_mut())
    }

    pub(crate) fn as_out(&mut self) -> *mut *mut c_void {
        &mut self.0
    }

    /// # Safety
    ///
    /// The codec must have reported success, and the pointer must hold `len` initialized elements
    /// of type `T`.
    pub(crate) unsafe fn into_ffi_vec<T>(mut self, len: usize) -> Result<FfiVec<T>, Error> {
        let ptr = std::mem::replace(&mut self.0, std::ptr::null_mut());
        let Some(ptr) = NonNull::new(ptr.cast::<T>()) else {
            crate::trace!("SPERR reported success without an output buffer");
            return Err(Error::Failure);
        };
        debug_assert_eq!(0, ptr.as_ptr().align_offset(std::mem::align_of::<T>()));
        Ok(unsafe { FfiVec::from_raw_parts(ptr, len) })
    }
}
impl Drop for DstPtr {
    fn drop(&mut self) {
        if !self.0.is_null() {
            unsafe { sperr_sys::sperr_rs_free(self.0) };
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use rand::prelude::*;

    use crate::{compress_2d, decompress_2d, CompressionMode, Element};

    /// A smooth field with some noise, shaped like typical simulation output.
    pub(crate) fn rand_field<T: Element + From<f32>>(len: usize, rand: &mut impl Rng) -> Vec<T> {
        let phase = rand.random_range(0.0..std::f32::consts::TAU);
        (0..len)
            .map(|i| {
                let x = i as f32 * 0.05 + phase;
                T::from(x.sin() * 100.0 + rand.random_range(-1.0..1.0))
            })
            .collect()
    }

    pub(crate) fn rand_dim(rand: &mut impl Rng) -> usize {
        rand.random_range(8..48)
    }

    #[test]
    fn ffi_vec_into_vec() {
        let mut rand = StdRng::seed_from_u64(0x3c1f0b6e8d2a4977);
        let dims = [rand_dim(&mut rand), rand_dim(&mut rand)];
        let src = rand_field::<f32>(dims[0] * dims[1], &mut rand);
        let mode = CompressionMode::PointwiseError { pwe: 0.01 };

        let compressed = compress_2d(&src, dims, mode, false).unwrap();
        let copy = compressed.as_slice().to_vec();
        assert!(!compressed.is_empty());
        assert_eq!(copy, compressed.into_vec());

        let decompressed = decompress_2d::<f32>(&copy, dims).unwrap();
        assert_eq!(src.len(), decompressed.len());
    }

    #[test]
    fn ffi_vec_send() {
        let mut rand = StdRng::seed_from_u64(0x52f9e3c0a1b6d847);
        let dims = [16, 16];
        let src = rand_field::<f64>(dims[0] * dims[1], &mut rand);
        let mode = CompressionMode::BitsPerPixel { bpp: 8.0 };

        let compressed = compress_2d(&src, dims, mode, true).unwrap();
        let len = std::thread::spawn(move || {
            let len = compressed.len();
            drop(compressed);
            len
        })
        .join()
        .unwrap();
        assert!(len > sperr_sys::SPERR_HEADER_LEN_2D);
    }

    #[test]
    fn ffi_vec_mut() {
        let dims = [8, 8];
        let src = vec![1.5_f32; dims[0] * dims[1]];
        let mode = CompressionMode::PointwiseError { pwe: 1e-3 };

        let compressed = compress_2d(&src, dims, mode, false).unwrap();
        let mut decompressed = decompress_2d::<f32>(&compressed, dims).unwrap();
        decompressed.iter_mut().for_each(|v| *v = 0.0);
        assert!(decompressed.as_slice().iter().all(|&v| v == 0.0));
    }
}
