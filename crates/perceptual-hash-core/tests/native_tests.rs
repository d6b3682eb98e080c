//! Tests against the system pHash library (default `native` feature).
#![cfg(feature = "native")]

mod common;

use perceptual_hash_core::{distance, file_distance, image_hash, video_hash, Error};
use tempfile::TempDir;

use common::{create_test_image, init_test_logging, missing_file};

#[test]
fn test_same_file_has_zero_distance() {
    init_test_logging();
    let dir = TempDir::new().unwrap();
    let path = create_test_image(dir.path(), "gradient", 0);

    let hash = image_hash(&path).unwrap();
    assert_eq!(distance(hash, hash).unwrap(), 0);
    assert_eq!(file_distance(&path, &path).unwrap(), 0);
}

#[test]
fn test_hash_is_stable_across_calls() {
    init_test_logging();
    let dir = TempDir::new().unwrap();
    let path = create_test_image(dir.path(), "gradient", 0);

    assert_eq!(image_hash(&path).unwrap(), image_hash(&path).unwrap());
}

#[test]
fn test_distance_between_different_images_is_bounded() {
    init_test_logging();
    let dir = TempDir::new().unwrap();
    let a = create_test_image(dir.path(), "a", 0);
    let b = create_test_image(dir.path(), "b", 97);

    let d = file_distance(&a, &b).unwrap();
    assert!(d <= 64);
    assert_eq!(d, file_distance(&b, &a).unwrap());
}

#[test]
fn test_missing_files_fail() {
    init_test_logging();
    let dir = TempDir::new().unwrap();

    let image = missing_file(dir.path(), "nothing.jpg");
    assert!(matches!(image_hash(&image), Err(Error::Native { .. })));

    let video = missing_file(dir.path(), "nothing.mp4");
    assert!(matches!(video_hash(&video), Err(Error::Native { .. })));
}
