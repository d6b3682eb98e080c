mod common;

use perceptual_hash_core::{Config, Error, ImageHash, PerceptualHasher, VideoHash};

use common::{catalogue, init_test_logging};

#[test]
fn test_near_duplicates_are_similar() {
    init_test_logging();
    let hasher = PerceptualHasher::new(catalogue());

    let beach = hasher.image_hash("photos/beach.jpg").unwrap();
    let crop = hasher.image_hash("photos/beach-crop.jpg").unwrap();
    let forest = hasher.image_hash("photos/forest.jpg").unwrap();

    assert_eq!(hasher.distance(beach, crop).unwrap(), 1);
    assert_eq!(hasher.distance(beach, forest).unwrap(), 64);
    assert!(hasher.is_similar(beach, crop).unwrap());
    assert!(!hasher.is_similar(beach, forest).unwrap());
}

#[test]
fn test_file_distance_same_path_is_zero() {
    init_test_logging();
    let hasher = PerceptualHasher::new(catalogue());

    let hash = hasher.image_hash("photos/forest.jpg").unwrap();
    assert_eq!(
        hasher
            .file_distance("photos/forest.jpg", "photos/forest.jpg")
            .unwrap(),
        hasher.distance(hash, hash).unwrap()
    );
    assert_eq!(
        hasher
            .file_distance("photos/forest.jpg", "photos/forest.jpg")
            .unwrap(),
        0
    );
}

#[test]
fn test_missing_image_is_native_error() {
    init_test_logging();
    let hasher = PerceptualHasher::new(catalogue());

    match hasher.image_hash("photos/missing.jpg") {
        Err(Error::Native { operation, .. }) => assert_eq!(operation, "image_hash"),
        other => panic!("expected native error, got {:?}", other),
    }
}

#[test]
fn test_video_round_trip_through_distance() {
    init_test_logging();
    let hasher = PerceptualHasher::with_config(
        catalogue(),
        Config {
            video_threshold: 0,
            ..Config::default()
        },
    );

    let intro = hasher.video_hash("clips/intro.mp4").unwrap();
    let short = hasher.video_hash("clips/intro-short.mp4").unwrap();
    assert_eq!(intro.len(), 4);
    assert_eq!(short.len(), 2);

    let distance = hasher.video_distance_default(&intro, &short).unwrap();
    assert!((distance - 0.5).abs() < f64::EPSILON);
    assert_eq!(hasher.native().live_allocations(), 0);
}

#[test]
fn test_blank_video_hashes_but_cannot_be_compared() {
    init_test_logging();
    let hasher = PerceptualHasher::new(catalogue());

    let blank = hasher.video_hash("clips/blank.mp4").unwrap();
    let intro = hasher.video_hash("clips/intro.mp4").unwrap();
    assert!(blank.is_empty());

    assert_eq!(
        hasher.video_distance(&intro, &blank, 21).unwrap_err(),
        Error::EmptyVideoHash
    );
}

#[test]
fn test_corrupt_video_does_not_leak() {
    init_test_logging();
    let hasher = PerceptualHasher::new(catalogue());

    for _ in 0..10 {
        assert!(hasher.video_hash("clips/corrupt.mp4").is_err());
    }

    assert_eq!(hasher.native().allocations(), 10);
    assert_eq!(hasher.native().releases(), 10);
    assert_eq!(hasher.native().live_allocations(), 0);
}

#[test]
fn test_concurrent_calls_share_one_hasher() {
    init_test_logging();
    let hasher = PerceptualHasher::new(catalogue());

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for _ in 0..25 {
                    let video = hasher.video_hash("clips/intro.mp4").unwrap();
                    assert_eq!(video, VideoHash::new(vec![0x11, 0x22, 0x33, 0x44]));
                    assert!(hasher.video_hash("clips/corrupt.mp4").is_err());
                    assert_eq!(
                        hasher.image_hash("photos/beach.jpg").unwrap(),
                        ImageHash(0xf0f0_f0f0_0f0f_0f0f)
                    );
                }
            });
        }
    });

    let native = hasher.native();
    assert_eq!(native.allocations(), 200);
    assert_eq!(native.releases(), 200);
    assert_eq!(native.live_allocations(), 0);
    assert_eq!(native.invalid_releases(), 0);
}
