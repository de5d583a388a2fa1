use image::{ImageFormat, RgbImage};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, UNIX_EPOCH};
use wallsync_lib::platform::ImageCrateProbe;
use wallsync_lib::{SyncEngine, SyncReport};

fn set_mtime(path: &Path, secs: u64) {
    let file = fs::File::options().write(true).open(path).unwrap();
    file.set_modified(UNIX_EPOCH + Duration::from_secs(secs)).unwrap();
}

/// 写入一张没有扩展名的 JPEG，模拟缓存中的文件
fn cached_image(dir: &Path, name: &str, width: u32, height: u32, mtime_secs: u64) {
    let path = dir.join(name);
    RgbImage::from_pixel(width, height, image::Rgb([30, 90, 160]))
        .save_with_format(&path, ImageFormat::Jpeg)
        .unwrap();
    set_mtime(&path, mtime_secs);
}

fn names_in(dir: &Path) -> Vec<String> {
    let mut names: Vec<_> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

fn engine() -> SyncEngine {
    SyncEngine::new(Arc::new(ImageCrateProbe))
}

#[tokio::test]
async fn matching_image_is_synced_into_empty_destination() {
    let cache = tempfile::tempdir().unwrap();
    let dest = tempfile::tempdir().unwrap();
    cached_image(cache.path(), "img1", 1920, 1080, 100);

    let report = engine().sync(cache.path(), dest.path()).await.unwrap();

    let SyncReport::Synced(summary) = report else {
        panic!("expected Synced, got {:?}", report);
    };
    assert_eq!(summary.attempted, 1);
    assert_eq!(summary.accepted, 1);
    assert_eq!(names_in(dest.path()), vec!["img1.jpg"]);
}

#[tokio::test]
async fn wrong_dimensions_leave_destination_empty() {
    let cache = tempfile::tempdir().unwrap();
    let dest = tempfile::tempdir().unwrap();
    cached_image(cache.path(), "img2", 800, 600, 50);

    let report = engine().sync(cache.path(), dest.path()).await.unwrap();

    assert_eq!(report.attempted(), 1);
    let SyncReport::Synced(summary) = report else {
        panic!("expected Synced");
    };
    assert_eq!(summary.accepted, 0);
    assert_eq!(summary.rejected, 1);
    assert!(names_in(dest.path()).is_empty());
    assert!(cache.path().join("img2").exists());
}

#[tokio::test]
async fn newer_destination_means_up_to_date_without_writes() {
    let cache = tempfile::tempdir().unwrap();
    let dest = tempfile::tempdir().unwrap();
    cached_image(cache.path(), "old1", 1920, 1080, 150);
    cached_image(cache.path(), "old2", 1920, 1080, 200);
    cached_image(dest.path(), "kept.jpg", 1920, 1080, 200);

    let report = engine().sync(cache.path(), dest.path()).await.unwrap();

    assert_eq!(
        report,
        SyncReport::UpToDate {
            destination: dest.path().to_path_buf()
        }
    );
    assert_eq!(names_in(dest.path()), vec!["kept.jpg"]);
}

#[tokio::test]
async fn oversized_files_are_never_copied() {
    let cache = tempfile::tempdir().unwrap();
    let dest = tempfile::tempdir().unwrap();
    let big = cache.path().join("huge");
    fs::write(&big, vec![0u8; 2_000_000]).unwrap();
    set_mtime(&big, 10_000);
    cached_image(cache.path(), "normal", 1920, 1080, 100);

    let report = engine().sync(cache.path(), dest.path()).await.unwrap();

    assert_eq!(report.attempted(), 1);
    assert_eq!(names_in(dest.path()), vec!["normal.jpg"]);
}

#[tokio::test]
async fn second_run_is_up_to_date() {
    let cache = tempfile::tempdir().unwrap();
    let dest = tempfile::tempdir().unwrap();
    cached_image(cache.path(), "first", 1920, 1080, 100);
    cached_image(cache.path(), "second", 1920, 1080, 300);

    let first = engine().sync(cache.path(), dest.path()).await.unwrap();
    assert_eq!(first.attempted(), 2);

    let second = engine().sync(cache.path(), dest.path()).await.unwrap();
    assert!(matches!(second, SyncReport::UpToDate { .. }));
    assert_eq!(names_in(dest.path()), vec!["first.jpg", "second.jpg"]);
}

#[tokio::test]
async fn new_cache_image_after_sync_is_picked_up() {
    let cache = tempfile::tempdir().unwrap();
    let dest = tempfile::tempdir().unwrap();
    cached_image(cache.path(), "monday", 1920, 1080, 100);
    engine().sync(cache.path(), dest.path()).await.unwrap();

    cached_image(cache.path(), "tuesday", 1920, 1080, 200);
    let report = engine().sync(cache.path(), dest.path()).await.unwrap();

    assert_eq!(report.attempted(), 1);
    assert_eq!(names_in(dest.path()), vec!["monday.jpg", "tuesday.jpg"]);
}

#[tokio::test]
async fn undecodable_file_does_not_block_others() {
    let cache = tempfile::tempdir().unwrap();
    let dest = tempfile::tempdir().unwrap();
    let junk = cache.path().join("junk");
    fs::write(&junk, b"this is not an image").unwrap();
    set_mtime(&junk, 120);
    cached_image(cache.path(), "good", 1920, 1080, 110);

    let report = engine().sync(cache.path(), dest.path()).await.unwrap();

    let SyncReport::Synced(summary) = report else {
        panic!("expected Synced");
    };
    assert_eq!(summary.attempted, 2);
    assert_eq!(summary.accepted, 1);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.errors.len(), 1);
    assert_eq!(names_in(dest.path()), vec!["good.jpg"]);
}
