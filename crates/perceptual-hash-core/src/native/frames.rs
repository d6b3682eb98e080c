use log::warn;

use super::{NativeHasher, RawFrames};

/// Owns a frame buffer returned by the native side and releases it on drop,
/// so every exit path (including errors and unwinding) frees it exactly once.
pub(crate) struct NativeFrames<'a, N: NativeHasher + ?Sized> {
    native: &'a N,
    ptr: *mut u64,
    len: usize,
}

impl<'a, N: NativeHasher + ?Sized> NativeFrames<'a, N> {
    /// Take ownership of `raw`. The status is left to the caller.
    pub(crate) fn adopt(native: &'a N, raw: &RawFrames) -> Self {
        let len = usize::try_from(raw.len).unwrap_or_else(|_| {
            warn!("Native side reported negative frame count {}", raw.len);
            0
        });

        Self {
            native,
            ptr: raw.ptr,
            len,
        }
    }

    /// Copy the frames into host-owned memory
    pub(crate) fn to_vec(&self) -> Vec<u64> {
        if self.ptr.is_null() {
            if self.len > 0 {
                warn!(
                    "Native side reported {} frames but no buffer; treating as empty",
                    self.len
                );
            }
            return Vec::new();
        }
        if self.len == 0 {
            return Vec::new();
        }

        // SAFETY: NativeHasher guarantees a non-null buffer holds `len`
        // initialised hashes until it is released, which only happens in drop.
        unsafe { std::slice::from_raw_parts(self.ptr, self.len) }.to_vec()
    }
}

impl<N: NativeHasher + ?Sized> Drop for NativeFrames<'_, N> {
    fn drop(&mut self) {
        if !self.ptr.is_null() {
            // SAFETY: the pointer came from `video_hash` on this hasher and
            // this guard is its only owner.
            unsafe { self.native.release_frames(self.ptr) };
        }
    }
}
