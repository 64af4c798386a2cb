//! Image re-encoding
//!
//! Compiled against the `image` crate when the `images` feature is on. The
//! processor asks [`available`] once and never calls [`recompress`] otherwise.

use std::path::Path;

/// Whether this build can decode and encode images
pub const fn available() -> bool {
    cfg!(feature = "images")
}

/// Decode `source` and write it to `target` in the format implied by the
/// target's extension.
///
/// Images with an alpha channel are flattened to RGB first; the transparency
/// is lost in the output. JPEG output uses `quality`; PNG output ignores it
/// and uses maximum lossless compression instead.
#[cfg(feature = "images")]
pub fn recompress(source: &Path, target: &Path, quality: u8) -> Result<(), String> {
    use std::fs::File;
    use std::io::{BufWriter, Write};

    use image::codecs::jpeg::JpegEncoder;
    use image::codecs::png::{CompressionType, FilterType, PngEncoder};
    use image::{ImageFormat, ImageReader};

    let image = ImageReader::open(source)
        .map_err(|e| e.to_string())?
        .with_guessed_format()
        .map_err(|e| e.to_string())?
        .decode()
        .map_err(|e| e.to_string())?;

    let format = ImageFormat::from_path(target).map_err(|e| e.to_string())?;
    let image = flatten(image, format);

    let file = File::create(target).map_err(|e| e.to_string())?;
    let mut writer = BufWriter::new(file);

    let written = match format {
        ImageFormat::Jpeg => {
            image.write_with_encoder(JpegEncoder::new_with_quality(&mut writer, quality))
        }
        ImageFormat::Png => image.write_with_encoder(PngEncoder::new_with_quality(
            &mut writer,
            CompressionType::Best,
            FilterType::Adaptive,
        )),
        other => image.write_to(&mut writer, other),
    };
    written.map_err(|e| e.to_string())?;

    writer.flush().map_err(|e| e.to_string())
}

#[cfg(not(feature = "images"))]
pub fn recompress(_source: &Path, _target: &Path, _quality: u8) -> Result<(), String> {
    Err("image support is not compiled in".to_string())
}

#[cfg(feature = "images")]
fn flatten(image: image::DynamicImage, format: image::ImageFormat) -> image::DynamicImage {
    use image::{ColorType, DynamicImage, ImageFormat};

    let needs_rgb = image.color().has_alpha()
        || match format {
            ImageFormat::Jpeg => !matches!(image.color(), ColorType::L8 | ColorType::Rgb8),
            ImageFormat::Gif => image.color() != ColorType::Rgb8,
            _ => false,
        };

    if needs_rgb {
        DynamicImage::ImageRgb8(image.to_rgb8())
    } else {
        image
    }
}
