//! Perceptual image and video hashing backed by the pHash library.
//!
//! This library is a thin binding layer; the hashing itself happens in pHash:
//! - DCT perceptual hashes of images and of sampled video frames
//! - Hamming distance between image hashes
//! - Aggregate distance between video hashes
//!
//! All native access goes through the [`NativeHasher`] capability. The default
//! `native` feature links the system pHash library and provides the crate-root
//! functions below. Building with `--no-default-features` drops the link step
//! and those functions; any implementation (such as [`MockHasher`]) can still
//! be plugged in via [`PerceptualHasher`].

// -- Internal Modules --
mod binding;
mod error;

// -- Public Re-exports --
pub use binding::PerceptualHasher;
pub use config::{Config, LogLevel};
pub use error::{Error, Result};
pub use native::{MockHasher, NativeHasher, NativeResult, NativeStatus, RawFrames};
pub use types::{ImageHash, VideoHash};

#[cfg(feature = "native")]
pub use native::PHashLibrary;

// -- Public Modules --
pub mod config;
pub mod logging;
pub mod native;
pub mod types;

// -- System pHash Shortcuts --

#[cfg(feature = "native")]
use std::path::Path;

/// DCT perceptual hash of the image at `path`
#[cfg(feature = "native")]
pub fn image_hash(path: impl AsRef<Path>) -> Result<ImageHash> {
    PerceptualHasher::system().image_hash(path)
}

/// DCT perceptual hashes of the sampled frames of the video at `path`
#[cfg(feature = "native")]
pub fn video_hash(path: impl AsRef<Path>) -> Result<VideoHash> {
    PerceptualHasher::system().video_hash(path)
}

/// Hamming distance between two image hashes
#[cfg(feature = "native")]
pub fn distance(a: ImageHash, b: ImageHash) -> Result<u32> {
    PerceptualHasher::system().distance(a, b)
}

/// Distance between two video hashes under `threshold`
#[cfg(feature = "native")]
pub fn video_distance(a: &VideoHash, b: &VideoHash, threshold: i32) -> Result<f64> {
    PerceptualHasher::system().video_distance(a, b, threshold)
}

/// Hamming distance between the images at two paths
#[cfg(feature = "native")]
pub fn file_distance(path_a: impl AsRef<Path>, path_b: impl AsRef<Path>) -> Result<u32> {
    PerceptualHasher::system().file_distance(path_a, path_b)
}
