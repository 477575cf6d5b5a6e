//! Image decoding with format sniffing.
//!
//! [`decode`] inspects the leading bytes of a resource, picks exactly one
//! decode path (PNG or JPEG) and produces a flat pixel buffer plus
//! width/height/format metadata ready for texture upload. Inputs matching
//! neither probe are rejected as [`Error::UnsupportedFormat`]; a sniffed
//! image that fails to parse is [`Error::CorruptData`].

use image::ImageFormat;

use crate::error::Error;

/// The canonical 8-byte PNG file signature.
const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// The JPEG SOI marker that starts every JPEG stream.
const JPEG_SOI: [u8; 2] = [0xFF, 0xD8];

/// Channel layout of a decoded pixel buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// Three bytes per pixel, no alpha.
    Rgb,
    /// Four bytes per pixel with alpha.
    Rgba,
}

impl PixelFormat {
    /// Bytes occupied by one pixel.
    #[must_use]
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }

    /// The matching GL pixel format enum.
    #[must_use]
    pub fn gl_format(self) -> u32 {
        match self {
            Self::Rgb => glow::RGB,
            Self::Rgba => glow::RGBA,
        }
    }
}

/// A decoded image ready for texture upload.
///
/// The buffer length always equals `width * height * bytes_per_pixel`; the
/// constructor enforces it, so consumers can index rows without
/// re-validating.
#[derive(Debug)]
pub struct DecodedImage {
    width: u32,
    height: u32,
    format: PixelFormat,
    pixels: Vec<u8>,
}

impl DecodedImage {
    fn new(width: u32, height: u32, format: PixelFormat, pixels: Vec<u8>) -> Self {
        assert_eq!(
            pixels.len(),
            width as usize * height as usize * format.bytes_per_pixel(),
        );
        Self {
            width,
            height,
            format,
            pixels,
        }
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Channel layout of [`pixels`](Self::pixels).
    #[must_use]
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// The flat, tightly packed pixel buffer, rows top to bottom.
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

/// Decode raw file bytes into a pixel buffer.
///
/// The leading bytes select the decode path: the PNG signature picks the PNG
/// decoder, a JPEG SOI marker picks the JPEG decoder. Exactly one path is
/// ever invoked for a given input.
///
/// PNG output keeps the source's alpha: images with any alpha channel
/// (including transparency chunks, which the decoder expands) come out as
/// [`PixelFormat::Rgba`], everything else as [`PixelFormat::Rgb`], with bit
/// depths normalized to 8 bits per channel and grayscale/palette data
/// expanded to color. Interlaced images are deinterlaced by the decoder.
/// JPEG output is always [`PixelFormat::Rgb`].
///
/// # Errors
///
/// [`Error::UnsupportedFormat`] when neither probe matches, including
/// buffers that start with a JPEG SOI marker but have no parseable frame
/// header; [`Error::CorruptData`] when the selected decoder rejects the
/// data, such as a truncated image body.
pub fn decode(name: &str, bytes: &[u8]) -> Result<DecodedImage, Error> {
    if bytes.starts_with(&PNG_SIGNATURE) {
        decode_with(name, bytes, ImageFormat::Png)
    } else if bytes.starts_with(&JPEG_SOI) && jpeg_header_parses(bytes) {
        decode_with(name, bytes, ImageFormat::Jpeg)
    } else {
        Err(Error::UnsupportedFormat {
            name: name.to_owned(),
        })
    }
}

/// Whether the buffer carries a parseable JPEG frame header.
///
/// An SOI marker alone does not make the buffer a JPEG; constructing the
/// decoder parses the header segments, so a failure here means the probe
/// did not match.
fn jpeg_header_parses(bytes: &[u8]) -> bool {
    image::codecs::jpeg::JpegDecoder::new(std::io::Cursor::new(bytes)).is_ok()
}

fn decode_with(name: &str, bytes: &[u8], format: ImageFormat) -> Result<DecodedImage, Error> {
    let dynamic =
        image::load_from_memory_with_format(bytes, format).map_err(|e| Error::CorruptData {
            name: name.to_owned(),
            detail: e.to_string(),
        })?;

    let (width, height) = (dynamic.width(), dynamic.height());
    // JPEG never carries alpha, so this branch also pins its output to RGB.
    let image = if dynamic.color().has_alpha() {
        DecodedImage::new(width, height, PixelFormat::Rgba, dynamic.into_rgba8().into_raw())
    } else {
        DecodedImage::new(width, height, PixelFormat::Rgb, dynamic.into_rgb8().into_raw())
    };
    Ok(image)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use image::codecs::jpeg::JpegEncoder;
    use image::codecs::png::PngEncoder;
    use image::{ExtendedColorType, ImageEncoder};

    fn encode_png(pixels: &[u8], width: u32, height: u32, color: ExtendedColorType) -> Vec<u8> {
        let mut out = Vec::new();
        PngEncoder::new(&mut out)
            .write_image(pixels, width, height, color)
            .unwrap();
        out
    }

    #[test]
    fn minimal_opaque_png_decodes_as_rgb() {
        let bytes = encode_png(&[10, 20, 30], 1, 1, ExtendedColorType::Rgb8);
        let image = decode("image1.png", &bytes).unwrap();
        assert_eq!(image.width(), 1);
        assert_eq!(image.height(), 1);
        assert_eq!(image.format(), PixelFormat::Rgb);
        assert_eq!(image.pixels(), &[10, 20, 30]);
    }

    #[test]
    fn png_with_alpha_channel_decodes_as_rgba() {
        let bytes = encode_png(&[10, 20, 30, 0], 1, 1, ExtendedColorType::Rgba8);
        let image = decode("image1.png", &bytes).unwrap();
        assert_eq!(image.format(), PixelFormat::Rgba);
        assert_eq!(image.pixels(), &[10, 20, 30, 0]);
    }

    #[test]
    fn grayscale_png_expands_to_rgb() {
        let bytes = encode_png(&[128, 255], 2, 1, ExtendedColorType::L8);
        let image = decode("gray.png", &bytes).unwrap();
        assert_eq!(image.format(), PixelFormat::Rgb);
        assert_eq!(image.pixels(), &[128, 128, 128, 255, 255, 255]);
    }

    #[test]
    fn jpeg_always_decodes_as_rgb() {
        let mut bytes = Vec::new();
        JpegEncoder::new(&mut bytes)
            .write_image(&[200, 100, 50, 60, 70, 80], 2, 1, ExtendedColorType::Rgb8)
            .unwrap();
        let image = decode("image2.jpg", &bytes).unwrap();
        assert_eq!(image.width(), 2);
        assert_eq!(image.height(), 1);
        assert_eq!(image.format(), PixelFormat::Rgb);
        assert_eq!(image.pixels().len(), 2 * 3);
    }

    #[test]
    fn unknown_leading_bytes_are_unsupported() {
        match decode("note.txt", b"definitely not an image") {
            Err(Error::UnsupportedFormat { name }) => assert_eq!(name, "note.txt"),
            other => panic!("expected UnsupportedFormat, got {other:?}"),
        }
    }

    #[test]
    fn empty_input_is_unsupported() {
        assert!(matches!(
            decode("empty", &[]),
            Err(Error::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn truncated_png_is_corrupt_and_names_the_resource() {
        let mut bytes = encode_png(&[1, 2, 3], 1, 1, ExtendedColorType::Rgb8);
        bytes.truncate(12);
        match decode("image1.png", &bytes) {
            Err(Error::CorruptData { name, .. }) => assert_eq!(name, "image1.png"),
            other => panic!("expected CorruptData, got {other:?}"),
        }
    }

    #[test]
    fn soi_marker_without_frame_header_is_unsupported() {
        let bytes = [0xFF, 0xD8, 0x00, 0x01, 0x02, 0x03];
        match decode("image2.jpg", &bytes) {
            Err(Error::UnsupportedFormat { name }) => assert_eq!(name, "image2.jpg"),
            other => panic!("expected UnsupportedFormat, got {other:?}"),
        }
    }

    #[test]
    fn jpeg_truncated_after_header_is_corrupt() {
        let mut bytes = Vec::new();
        JpegEncoder::new(&mut bytes)
            .write_image(&[200, 100, 50, 60, 70, 80], 2, 1, ExtendedColorType::Rgb8)
            .unwrap();
        // Drop the tail of the scan data; the header segments stay intact.
        bytes.truncate(bytes.len() - 10);
        assert!(matches!(
            decode("image2.jpg", &bytes),
            Err(Error::CorruptData { .. })
        ));
    }

    #[test]
    fn buffer_length_matches_dimensions_and_format() {
        let pixels: Vec<u8> = (0..3 * 2 * 4).map(|i| u8::try_from(i).unwrap()).collect();
        let bytes = encode_png(&pixels, 3, 2, ExtendedColorType::Rgba8);
        let image = decode("rect.png", &bytes).unwrap();
        assert_eq!(
            image.pixels().len(),
            image.width() as usize * image.height() as usize * image.format().bytes_per_pixel()
        );
    }
}
