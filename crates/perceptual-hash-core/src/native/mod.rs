//! # Native Boundary
//!
//! Everything that crosses into the hashing library goes through the
//! [`NativeHasher`] capability. It spells out, per call, who allocates and who
//! releases:
//!
//! | Call | Allocates | Owns during call | Releases |
//! |---|---|---|---|
//! | `image_hash` | binding layer (path C string) | binding layer | binding layer, on return |
//! | `video_hash` | native side (frame array) | binding layer after return | binding layer via `release_frames` |
//! | `hamming_distance` | nothing | - | - |
//! | `video_hamming_distance` | binding layer (hash slices) | binding layer | binding layer |
//!
//! [`PHashLibrary`] implements the capability with pHash (feature `native`);
//! [`MockHasher`] is a deterministic stand-in that counts allocations.

use std::ffi::{c_int, CStr, CString};
use std::path::Path;

use crate::error::{Error, Result};

mod frames;
pub mod mock;
#[cfg(feature = "native")]
mod phash;

pub(crate) use frames::NativeFrames;
pub use mock::MockHasher;
#[cfg(feature = "native")]
pub use phash::PHashLibrary;

/// Failure status reported by a native routine, passed through unchanged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeStatus(pub i32);

pub type NativeResult<T> = core::result::Result<T, NativeStatus>;

/// Frame buffer handed over by [`NativeHasher::video_hash`]
#[derive(Debug)]
pub struct RawFrames {
    /// Native-allocated array, or null
    pub ptr: *mut u64,
    /// Number of hashes the native side reported
    pub len: c_int,
    /// `0` on success
    pub status: c_int,
}

impl RawFrames {
    /// A failure that handed back no buffer
    pub fn failed(status: c_int) -> Self {
        Self {
            ptr: std::ptr::null_mut(),
            len: 0,
            status,
        }
    }
}

/// Capability interface over the native hashing library.
///
/// # Safety
///
/// Implementors guarantee that a non-null [`RawFrames::ptr`] returned from
/// [`video_hash`](Self::video_hash) points to at least `len` initialised
/// `u64`s (when `len` is positive), stays valid until passed to
/// [`release_frames`](Self::release_frames), and is not aliased elsewhere.
/// This holds whatever `status` is reported.
pub unsafe trait NativeHasher {
    /// DCT hash of the image at `path`
    fn image_hash(&self, path: &CStr) -> NativeResult<u64>;

    /// DCT hash of every sampled frame of the video at `path`. Ownership of the
    /// returned buffer passes to the caller.
    fn video_hash(&self, path: &CStr) -> RawFrames;

    /// Release a buffer returned by [`video_hash`](Self::video_hash).
    ///
    /// # Safety
    ///
    /// `frames` must be a non-null pointer obtained from `video_hash` on this
    /// hasher and not released before.
    unsafe fn release_frames(&self, frames: *mut u64);

    /// Bit-level Hamming distance between two image hashes
    fn hamming_distance(&self, a: u64, b: u64) -> NativeResult<i32>;

    /// Aggregate distance between two video hashes. Both slices are non-empty
    /// and no longer than `c_int::MAX`; `threshold` is opaque.
    fn video_hamming_distance(&self, a: &[u64], b: &[u64], threshold: i32) -> NativeResult<f64>;
}

/// Convert a path into the NUL-terminated string the native library expects
pub(crate) fn path_to_cstring(path: &Path) -> Result<CString> {
    #[cfg(unix)]
    let bytes = {
        use std::os::unix::ffi::OsStrExt;
        path.as_os_str().as_bytes().to_vec()
    };
    #[cfg(not(unix))]
    let bytes = path
        .to_str()
        .ok_or_else(|| Error::InvalidPath(path.to_path_buf()))?
        .as_bytes()
        .to_vec();

    CString::new(bytes).map_err(|_| Error::InvalidPath(path.to_path_buf()))
}

/// Length of a hash sequence as the native length type
pub(crate) fn native_len(frames: &[u64]) -> Result<c_int> {
    c_int::try_from(frames.len()).map_err(|_| Error::TooManyFrames(frames.len()))
}
