#![allow(dead_code)]

pub mod test_images;
pub use test_images::*;

use perceptual_hash_core::MockHasher;

/// Route library logging to the test harness
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Mock library with a small fixed catalogue of images and videos
pub fn catalogue() -> MockHasher {
    MockHasher::new()
        .with_image("photos/beach.jpg", 0xf0f0_f0f0_0f0f_0f0f)
        .with_image("photos/beach-crop.jpg", 0xf0f0_f0f0_0f0f_0f0e)
        .with_image("photos/forest.jpg", 0x0f0f_0f0f_f0f0_f0f0)
        .with_video("clips/intro.mp4", vec![0x11, 0x22, 0x33, 0x44])
        .with_video("clips/intro-short.mp4", vec![0x11, 0x22])
        .with_video("clips/blank.mp4", vec![])
        .with_failing_video_buffer("clips/corrupt.mp4", -1, vec![0xde, 0xad])
}
