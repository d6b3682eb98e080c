//! # Binding Layer
//!
//! [`PerceptualHasher`] turns Rust arguments into the native representation,
//! calls the hashing library through a [`NativeHasher`], and turns the result
//! (or the native failure status) back into Rust values.
//!
//! ## Hamming Distance Interpretation
//!
//! For 64-bit DCT image hashes:
//!
//! - 0-3: Nearly identical images (same image with minor modifications)
//! - 4-10: Similar images (same subject with moderate differences)
//! - >10: Different images
//!
//! Every call is synchronous and stateless. Buffers crossing the boundary are
//! released before the call returns, on success and on failure.

use log::debug;
use std::path::Path;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::log_native_error;
use crate::native::{native_len, path_to_cstring, NativeFrames, NativeHasher};
use crate::types::{ImageHash, VideoHash};

/// Perceptual hashing over a native hashing library
#[derive(Debug, Clone, Default)]
pub struct PerceptualHasher<N> {
    native: N,
    config: Config,
}

#[cfg(feature = "native")]
impl PerceptualHasher<crate::native::PHashLibrary> {
    /// Hasher backed by the system pHash library with default configuration
    pub fn system() -> Self {
        Self::new(crate::native::PHashLibrary::new())
    }
}

impl<N: NativeHasher> PerceptualHasher<N> {
    pub fn new(native: N) -> Self {
        Self::with_config(native, Config::default())
    }

    pub fn with_config(native: N, config: Config) -> Self {
        Self { native, config }
    }

    pub fn native(&self) -> &N {
        &self.native
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Calculate the DCT perceptual hash of the image at `path`.
    ///
    /// The path is not checked here; a missing or undecodable file surfaces
    /// as [`Error::Native`] with whatever status the library reported.
    pub fn image_hash(&self, path: impl AsRef<Path>) -> Result<ImageHash> {
        let path = path.as_ref();
        let c_path = path_to_cstring(path)?;

        let result = self.native.image_hash(&c_path);
        drop(c_path);

        match result {
            Ok(hash) => {
                debug!("Image hash for {}: {:016x}", path.display(), hash);
                Ok(ImageHash(hash))
            }
            Err(status) => {
                log_native_error("image_hash", Some(path), status.0);
                Err(Error::native("image_hash", status.0))
            }
        }
    }

    /// Calculate the DCT perceptual hash of every sampled frame of the video
    /// at `path`.
    ///
    /// A video with no sampled frames yields an empty [`VideoHash`].
    pub fn video_hash(&self, path: impl AsRef<Path>) -> Result<VideoHash> {
        let path = path.as_ref();
        let c_path = path_to_cstring(path)?;

        let raw = self.native.video_hash(&c_path);
        drop(c_path);

        // Adopt before looking at the status so a failed call that still
        // returned a buffer gets it released
        let frames = NativeFrames::adopt(&self.native, &raw);

        if raw.status != 0 {
            log_native_error("video_hash", Some(path), raw.status);
            return Err(Error::native("video_hash", raw.status));
        }

        let hashes = frames.to_vec();
        drop(frames);

        debug!("Video hash for {}: {} frames", path.display(), hashes.len());
        Ok(VideoHash::new(hashes))
    }

    /// Hamming distance (0-64) between two image hashes
    pub fn distance(&self, a: ImageHash, b: ImageHash) -> Result<u32> {
        let distance = match self.native.hamming_distance(a.0, b.0) {
            Ok(distance) => distance,
            Err(status) => {
                log_native_error("hamming_distance", None, status.0);
                return Err(Error::native("hamming_distance", status.0));
            }
        };

        match u32::try_from(distance) {
            Ok(distance) if distance <= 64 => Ok(distance),
            _ => {
                log_native_error("hamming_distance", None, distance);
                Err(Error::native("hamming_distance", distance))
            }
        }
    }

    /// Check if two images are perceptually similar under the configured
    /// threshold
    pub fn is_similar(&self, a: ImageHash, b: ImageHash) -> Result<bool> {
        Ok(self.distance(a, b)? <= self.config.similarity_threshold)
    }

    /// Aggregate distance between two video hashes.
    ///
    /// `threshold` is handed to the native library unchanged. Both hashes must
    /// have at least one frame.
    pub fn video_distance(&self, a: &VideoHash, b: &VideoHash, threshold: i32) -> Result<f64> {
        if a.is_empty() || b.is_empty() {
            return Err(Error::EmptyVideoHash);
        }
        native_len(a.frames())?;
        native_len(b.frames())?;

        let distance = self
            .native
            .video_hamming_distance(a.frames(), b.frames(), threshold)
            .map_err(|status| {
                log_native_error("video_hamming_distance", None, status.0);
                Error::native("video_hamming_distance", status.0)
            })?;

        debug!(
            "Video distance ({} vs {} frames, threshold {}): {}",
            a.len(),
            b.len(),
            threshold,
            distance
        );
        Ok(distance)
    }

    /// [`video_distance`](Self::video_distance) with the configured threshold
    pub fn video_distance_default(&self, a: &VideoHash, b: &VideoHash) -> Result<f64> {
        self.video_distance(a, b, self.config.video_threshold)
    }

    /// Hamming distance between the images at two paths. Stops at the first
    /// failure.
    pub fn file_distance(&self, path_a: impl AsRef<Path>, path_b: impl AsRef<Path>) -> Result<u32> {
        let hash_a = self.image_hash(path_a)?;
        let hash_b = self.image_hash(path_b)?;
        self.distance(hash_a, hash_b)
    }
}
