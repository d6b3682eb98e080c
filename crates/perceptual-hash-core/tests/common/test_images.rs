use image::{Rgb, RgbImage};
use std::path::{Path, PathBuf};

/// Write a gradient test image. `shift` moves the gradient so callers can
/// produce visibly different images.
pub fn create_test_image(dir: &Path, name: &str, shift: u32) -> PathBuf {
    let file_path = dir.join(format!("{}.bmp", name));
    let img = RgbImage::from_fn(128, 128, |x, y| {
        let v = ((x + shift) * 2 + y) % 256;
        Rgb([v as u8, (255 - v) as u8, ((x * y) % 256) as u8])
    });
    img.save(&file_path).unwrap();
    file_path
}

/// A path inside `dir` that is guaranteed not to exist
pub fn missing_file(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    assert!(!path.exists());
    path
}
