//! Tests for image recompression

#![cfg(feature = "images")]

mod common;

use std::fs;

use common::{create_file, noisy_rgb, workspace};
use image::codecs::jpeg::JpegEncoder;
use image::{ColorType, DynamicImage, ImageFormat, Rgba, RgbaImage};
use office_tweaks::error::OfficeError;
use office_tweaks::imaging::ImageProcessor;
use office_tweaks::report::Reporter;

fn processor() -> ImageProcessor {
    ImageProcessor::new(Reporter::quiet())
}

#[test]
fn test_codec_available_with_feature() {
    assert!(processor().is_available());
    assert!(processor().ensure_available().is_ok());
}

#[test]
fn test_compress_png_writes_prefixed_copy() {
    let (temp_dir, files) = workspace();
    let source = temp_dir.path().join("chart.png");
    noisy_rgb(64, 64).save(&source).unwrap();
    let before = fs::read(&source).unwrap();

    let result = processor().compress(&files, &source, 85, None).unwrap();

    assert_eq!(result.output, temp_dir.path().join("compressed_chart.png"));
    assert_eq!(result.original_size, before.len() as u64);
    assert_eq!(result.new_size, fs::metadata(&result.output).unwrap().len());
    assert_eq!(fs::read(&source).unwrap(), before, "Source must be untouched");
    assert_eq!(image::open(&result.output).unwrap().width(), 64);
}

#[test]
fn test_compress_collision_gets_suffix() {
    let (temp_dir, files) = workspace();
    let source = temp_dir.path().join("photo.jpg");
    noisy_rgb(32, 32).save(&source).unwrap();
    create_file(temp_dir.path(), "compressed_photo.jpg", b"earlier run");

    let result = processor().compress(&files, &source, 50, None).unwrap();

    assert_eq!(result.output, temp_dir.path().join("compressed_photo_1.jpg"));
    assert_eq!(
        fs::read(temp_dir.path().join("compressed_photo.jpg")).unwrap(),
        b"earlier run"
    );
}

#[test]
fn test_compress_into_output_directory() {
    let (temp_dir, files) = workspace();
    let source = temp_dir.path().join("icon.png");
    noisy_rgb(16, 16).save(&source).unwrap();
    let out_dir = temp_dir.path().join("out");

    let result = processor()
        .compress(&files, &source, 85, Some(&out_dir))
        .unwrap();

    assert_eq!(result.output, out_dir.join("compressed_icon.png"));
    assert!(result.output.exists());
}

#[test]
fn test_transparent_jpeg_target_is_flattened() {
    let (temp_dir, files) = workspace();
    // RGBA stored under a .jpg name; the decoder sniffs the real format
    let source = temp_dir.path().join("overlay.jpg");
    let rgba = RgbaImage::from_pixel(20, 20, Rgba([200, 10, 10, 128]));
    DynamicImage::ImageRgba8(rgba)
        .save_with_format(&source, ImageFormat::Png)
        .unwrap();

    let result = processor().compress(&files, &source, 85, None).unwrap();

    let output = image::open(&result.output).unwrap();
    assert_eq!(output.color(), ColorType::Rgb8);
}

#[test]
fn test_alpha_png_is_flattened() {
    let (temp_dir, files) = workspace();
    let source = temp_dir.path().join("logo.png");
    RgbaImage::from_pixel(8, 8, Rgba([0, 0, 255, 0]))
        .save(&source)
        .unwrap();

    let result = processor().compress(&files, &source, 85, None).unwrap();

    assert_eq!(image::open(&result.output).unwrap().color(), ColorType::Rgb8);
}

#[test]
fn test_recompressing_low_quality_jpeg_can_grow() {
    let (temp_dir, files) = workspace();
    let source = temp_dir.path().join("noise.jpg");
    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(noisy_rgb(128, 128))
        .write_with_encoder(JpegEncoder::new_with_quality(&mut bytes, 5))
        .unwrap();
    fs::write(&source, &bytes).unwrap();

    let result = processor().compress(&files, &source, 100, None).unwrap();

    assert!(result.savings() < 0, "Savings should be negative, got {}", result.savings());
    assert!(result.savings_percent() < 0.0);
}

#[test]
fn test_missing_image_not_found() {
    let (temp_dir, files) = workspace();
    let result = processor().compress(&files, &temp_dir.path().join("gone.png"), 85, None);
    assert!(matches!(result, Err(OfficeError::NotFound(_))));
}

#[test]
fn test_undecodable_image_leaves_no_output() {
    let (temp_dir, files) = workspace();
    let source = create_file(temp_dir.path(), "fake.png", b"not an image at all");

    let result = processor().compress(&files, &source, 85, None);

    assert!(matches!(result, Err(OfficeError::CompressionFailed { .. })));
    assert!(!temp_dir.path().join("compressed_fake.png").exists());
}

#[test]
fn test_compress_all_counts_only_successes_in_totals() {
    let (temp_dir, mut files) = workspace();
    noisy_rgb(24, 24).save(temp_dir.path().join("a.png")).unwrap();
    create_file(temp_dir.path(), "b.gif", b"broken gif");
    noisy_rgb(24, 24).save(temp_dir.path().join("c.jpg")).unwrap();
    create_file(temp_dir.path(), "notes.txt", b"ignored");

    let summary = processor().compress_all(&mut files, None, 70).unwrap();

    let expected_original = fs::metadata(temp_dir.path().join("a.png")).unwrap().len()
        + fs::metadata(temp_dir.path().join("c.jpg")).unwrap().len();
    assert_eq!(summary.success_count, 2);
    assert_eq!(summary.total_count, 3);
    assert_eq!(summary.total_original_size, expected_original);
}

#[test]
fn test_compress_all_empty_directory() {
    let (_temp_dir, mut files) = workspace();
    let summary = processor().compress_all(&mut files, None, 85).unwrap();
    assert!(summary.is_empty());
}
