//! Deterministic [`NativeHasher`] for tests.
//!
//! Images and videos are registered up front by path. Frame buffers are real
//! heap allocations that are tracked until released, so a test can assert
//! that the binding layer never leaks or double-frees them.

use std::collections::HashMap;
use std::ffi::{c_int, CStr};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use super::{NativeHasher, NativeResult, NativeStatus, RawFrames};

/// Status reported for paths nothing was registered for (`ENOENT`)
pub const MISSING_FILE_STATUS: i32 = 2;

/// Status reported for fixtures with more frames than `c_int` holds (`EOVERFLOW`)
pub const OVERFLOW_STATUS: i32 = 75;

#[derive(Debug, Clone)]
enum VideoFixture {
    Frames(Vec<u64>),
    Failure {
        status: i32,
        buffer: Option<Vec<u64>>,
    },
}

/// Mock hashing library.
/// WARNING: Do not use in production - hashes are whatever was registered!
#[derive(Debug, Default)]
pub struct MockHasher {
    images: HashMap<String, u64>,
    videos: HashMap<String, VideoFixture>,
    hamming_failure: Option<i32>,
    video_distance_failure: Option<i32>,

    // address -> element count of every buffer handed out and not yet released
    live: Mutex<HashMap<usize, usize>>,

    image_hash_calls: AtomicUsize,
    video_hash_calls: AtomicUsize,
    distance_calls: AtomicUsize,
    video_distance_calls: AtomicUsize,
    allocations: AtomicUsize,
    releases: AtomicUsize,
    invalid_releases: AtomicUsize,
}

fn key(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

fn frame_count(len: usize) -> NativeResult<c_int> {
    c_int::try_from(len).map_err(|_| NativeStatus(OVERFLOW_STATUS))
}

impl MockHasher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the hash returned for an image path
    pub fn with_image(mut self, path: impl AsRef<Path>, hash: u64) -> Self {
        self.images.insert(key(path.as_ref()), hash);
        self
    }

    /// Register the frame hashes returned for a video path
    pub fn with_video(mut self, path: impl AsRef<Path>, frames: Vec<u64>) -> Self {
        let fixture = VideoFixture::Frames(frames);
        self.videos.insert(key(path.as_ref()), fixture);
        self
    }

    /// Make a video path fail with `status` and no buffer
    pub fn with_failing_video(mut self, path: impl AsRef<Path>, status: i32) -> Self {
        self.videos.insert(
            key(path.as_ref()),
            VideoFixture::Failure {
                status,
                buffer: None,
            },
        );
        self
    }

    /// Make a video path fail with `status` while still handing back a buffer
    pub fn with_failing_video_buffer(
        mut self,
        path: impl AsRef<Path>,
        status: i32,
        frames: Vec<u64>,
    ) -> Self {
        self.videos.insert(
            key(path.as_ref()),
            VideoFixture::Failure {
                status,
                buffer: Some(frames),
            },
        );
        self
    }

    /// Make every Hamming distance call fail with `status`
    pub fn with_failing_distance(mut self, status: i32) -> Self {
        self.hamming_failure = Some(status);
        self
    }

    /// Make every video distance call fail with `status`
    pub fn with_failing_video_distance(mut self, status: i32) -> Self {
        self.video_distance_failure = Some(status);
        self
    }

    pub fn image_hash_calls(&self) -> usize {
        self.image_hash_calls.load(Ordering::SeqCst)
    }

    pub fn video_hash_calls(&self) -> usize {
        self.video_hash_calls.load(Ordering::SeqCst)
    }

    pub fn distance_calls(&self) -> usize {
        self.distance_calls.load(Ordering::SeqCst)
    }

    pub fn video_distance_calls(&self) -> usize {
        self.video_distance_calls.load(Ordering::SeqCst)
    }

    /// Frame buffers handed out so far
    pub fn allocations(&self) -> usize {
        self.allocations.load(Ordering::SeqCst)
    }

    /// Frame buffers released so far
    pub fn releases(&self) -> usize {
        self.releases.load(Ordering::SeqCst)
    }

    /// Release calls for pointers that were not live (double free or foreign)
    pub fn invalid_releases(&self) -> usize {
        self.invalid_releases.load(Ordering::SeqCst)
    }

    /// Frame buffers handed out and not yet released
    pub fn live_allocations(&self) -> usize {
        self.live.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Allocate `frames` and report them with `status`. A fixture too long for
    /// `c_int` fails without allocating.
    fn hand_out(&self, frames: &[u64], status: c_int) -> RawFrames {
        match frame_count(frames.len()) {
            Ok(len) => RawFrames {
                ptr: self.allocate(frames),
                len,
                status,
            },
            Err(overflow) => RawFrames::failed(overflow.0),
        }
    }

    fn allocate(&self, frames: &[u64]) -> *mut u64 {
        if frames.is_empty() {
            return std::ptr::null_mut();
        }

        let boxed: Box<[u64]> = frames.into();
        let len = boxed.len();
        let ptr = Box::into_raw(boxed) as *mut u64;

        self.live
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(ptr as usize, len);
        self.allocations.fetch_add(1, Ordering::SeqCst);
        ptr
    }
}

// SAFETY: every non-null pointer comes from `allocate`, which leaks a boxed
// slice of exactly `len` hashes and records it until `release_frames`.
unsafe impl NativeHasher for MockHasher {
    fn image_hash(&self, path: &CStr) -> NativeResult<u64> {
        self.image_hash_calls.fetch_add(1, Ordering::SeqCst);
        self.images
            .get(path.to_string_lossy().as_ref())
            .copied()
            .ok_or(NativeStatus(MISSING_FILE_STATUS))
    }

    fn video_hash(&self, path: &CStr) -> RawFrames {
        self.video_hash_calls.fetch_add(1, Ordering::SeqCst);

        match self.videos.get(path.to_string_lossy().as_ref()) {
            Some(VideoFixture::Frames(frames)) => self.hand_out(frames, 0),
            Some(VideoFixture::Failure {
                status,
                buffer: Some(frames),
            }) => self.hand_out(frames, *status),
            Some(VideoFixture::Failure {
                status,
                buffer: None,
            }) => RawFrames::failed(*status),
            None => RawFrames::failed(MISSING_FILE_STATUS),
        }
    }

    unsafe fn release_frames(&self, frames: *mut u64) {
        let len = self
            .live
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&(frames as usize));

        match len {
            Some(len) => {
                let slice = std::ptr::slice_from_raw_parts_mut(frames, len);
                drop(Box::from_raw(slice));
                self.releases.fetch_add(1, Ordering::SeqCst);
            }
            None => {
                self.invalid_releases.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    fn hamming_distance(&self, a: u64, b: u64) -> NativeResult<i32> {
        self.distance_calls.fetch_add(1, Ordering::SeqCst);
        match self.hamming_failure {
            Some(status) => Err(NativeStatus(status)),
            None => Ok((a ^ b).count_ones() as i32),
        }
    }

    /// Share of aligned frame pairs within `threshold` bits, over the longer
    /// sequence. Stands in for pHash's aggregation; only determinism matters.
    fn video_hamming_distance(&self, a: &[u64], b: &[u64], threshold: i32) -> NativeResult<f64> {
        self.video_distance_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(status) = self.video_distance_failure {
            return Err(NativeStatus(status));
        }

        let longest = a.len().max(b.len());
        if longest == 0 {
            return Err(NativeStatus(-1));
        }

        let matches = a
            .iter()
            .zip(b)
            .filter(|(x, y)| i64::from((*x ^ *y).count_ones()) <= i64::from(threshold))
            .count();

        Ok(matches as f64 / longest as f64)
    }
}

impl Drop for MockHasher {
    fn drop(&mut self) {
        // Reclaim anything the code under test leaked; the counters keep the
        // evidence
        let live = self.live.get_mut().unwrap_or_else(|e| e.into_inner());
        for (addr, len) in live.drain() {
            // SAFETY: recorded by `allocate` and never released
            let slice = std::ptr::slice_from_raw_parts_mut(addr as *mut u64, len);
            unsafe { drop(Box::from_raw(slice)) };
        }
    }
}
