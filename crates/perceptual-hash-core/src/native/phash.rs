use std::ffi::{c_double, c_int, CStr};

use perceptual_hash_sys as sys;

use super::{NativeHasher, NativeResult, NativeStatus, RawFrames};

/// [`NativeHasher`] backed by the system pHash library
#[derive(Debug, Clone, Copy, Default)]
pub struct PHashLibrary;

impl PHashLibrary {
    pub fn new() -> Self {
        Self
    }
}

fn check(status: c_int) -> NativeResult<()> {
    if status == 0 {
        Ok(())
    } else {
        Err(NativeStatus(status))
    }
}

// SAFETY: the shim hands back pHash's malloc'd frame array together with the
// frame count pHash reported, and releases it with free().
unsafe impl NativeHasher for PHashLibrary {
    fn image_hash(&self, path: &CStr) -> NativeResult<u64> {
        let mut hash: sys::ulong64 = 0;
        // SAFETY: `path` is NUL-terminated and outlives the call
        let status = unsafe { sys::phash_rs_dct_imagehash(path.as_ptr(), &mut hash) };
        check(status).map(|_| hash)
    }

    fn video_hash(&self, path: &CStr) -> RawFrames {
        let mut ptr: *mut sys::ulong64 = std::ptr::null_mut();
        let mut len: c_int = 0;
        // SAFETY: all out-pointers are valid locals
        let status = unsafe { sys::phash_rs_dct_videohash(path.as_ptr(), &mut ptr, &mut len) };
        RawFrames { ptr, len, status }
    }

    unsafe fn release_frames(&self, frames: *mut u64) {
        sys::phash_rs_free_hashes(frames);
    }

    fn hamming_distance(&self, a: u64, b: u64) -> NativeResult<i32> {
        let mut distance: c_int = 0;
        // SAFETY: `distance` is a valid out-pointer
        let status = unsafe { sys::phash_rs_hamming_distance(a, b, &mut distance) };
        check(status).map(|_| distance)
    }

    fn video_hamming_distance(&self, a: &[u64], b: &[u64], threshold: i32) -> NativeResult<f64> {
        // Callers guarantee both lengths fit c_int
        let len_a = c_int::try_from(a.len()).map_err(|_| NativeStatus(-1))?;
        let len_b = c_int::try_from(b.len()).map_err(|_| NativeStatus(-1))?;

        let mut distance: c_double = 0.0;
        // SAFETY: both slices stay borrowed for the duration of the call and
        // pHash only reads from them
        let status = unsafe {
            sys::phash_rs_dct_videohash_dist(
                a.as_ptr(),
                len_a,
                b.as_ptr(),
                len_b,
                threshold,
                &mut distance,
            )
        };
        check(status).map(|_| distance)
    }
}
