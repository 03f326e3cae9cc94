use image::{DynamicImage, ImageDecoder, ImageReader};
use image::metadata::Orientation;
use std::io::Cursor;

use crate::error::{PetalError, Result};

/// Decoded image as row-major RGBA bytes, 4 per pixel.
///
/// Both dimensions are at least 1 and `rgba.len() == width * height * 4`.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4));
        if width == 0 || height == 0 || expected != Some(rgba.len()) {
            return Err(PetalError::InvalidPixelBuffer { width, height, len: rgba.len() });
        }
        Ok(PixelBuffer { width, height, rgba })
    }

    /// Builds a buffer by evaluating `pixel(x, y)` for every position.
    pub fn from_fn<F>(width: u32, height: u32, pixel: F) -> Result<Self>
    where
        F: Fn(u32, u32) -> [u8; 4],
    {
        let mut rgba = Vec::with_capacity(width as usize * height as usize * 4);
        for y in 0..height {
            for x in 0..width {
                rgba.extend_from_slice(&pixel(x, y));
            }
        }
        PixelBuffer::new(width, height, rgba)
    }

    /// Decodes PNG/JPEG/WebP (or any other enabled format) bytes to RGBA,
    /// the way a browser canvas would see them: the EXIF orientation is
    /// applied, and fully transparent pixels read as transparent black.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let failed = |e: image::ImageError| PetalError::analysis_failure(e.to_string());

        let mut decoder = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| PetalError::analysis_failure(e.to_string()))?
            .into_decoder()
            .map_err(failed)?;
        let orientation = decoder.orientation().unwrap_or_else(|e| {
            log::debug!("ignoring unreadable orientation: {}", e);
            Orientation::NoTransforms
        });
        let mut img = DynamicImage::from_decoder(decoder).map_err(failed)?;
        img.apply_orientation(orientation);

        let mut rgba = img.to_rgba8();
        for px in rgba.pixels_mut() {
            if px[3] == 0 {
                px.0 = [0, 0, 0, 0];
            }
        }
        let (width, height) = rgba.dimensions();
        PixelBuffer::new(width, height, rgba.into_raw())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.rgba
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::codecs::jpeg::JpegEncoder;
    use image::{ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};

    fn png(img: &RgbaImage) -> Vec<u8> {
        let mut out = Vec::new();
        img.write_to(&mut Cursor::new(&mut out), ImageFormat::Png).unwrap();
        out
    }

    /// JPEG with an APP1 Exif segment carrying only IFD0 Orientation.
    fn jpeg_with_orientation(img: &RgbImage, orientation: u8) -> Vec<u8> {
        let mut jpeg = Vec::new();
        JpegEncoder::new(&mut jpeg).encode_image(img).unwrap();

        let mut app1 = vec![0xFF, 0xE1, 0x00, 0x22];
        app1.extend_from_slice(b"Exif\0\0");
        app1.extend_from_slice(b"MM\0\x2A\0\0\0\x08");
        app1.extend_from_slice(&[0x00, 0x01]);
        app1.extend_from_slice(&[0x01, 0x12, 0x00, 0x03, 0x00, 0x00, 0x00, 0x01, 0x00, orientation, 0x00, 0x00]);
        app1.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);

        // right after SOI
        jpeg.splice(2..2, app1);
        jpeg
    }

    #[test]
    fn rejects_mismatched_length() {
        assert!(PixelBuffer::new(2, 2, vec![0; 15]).is_err());
        assert!(PixelBuffer::new(0, 3, Vec::new()).is_err());
        assert!(PixelBuffer::new(2, 2, vec![0; 16]).is_ok());
    }

    #[test]
    fn from_fn_is_row_major() {
        let buf = PixelBuffer::from_fn(2, 2, |x, y| [x as u8, y as u8, 0, 255]).unwrap();
        assert_eq!(&buf.as_bytes()[4..8], &[1, 0, 0, 255]);
        assert_eq!(&buf.as_bytes()[8..12], &[0, 1, 0, 255]);
    }

    #[test]
    fn decodes_png_bytes() {
        let img = RgbaImage::from_pixel(3, 2, Rgba([10, 20, 30, 255]));
        let buf = PixelBuffer::decode(&png(&img)).unwrap();
        assert_eq!((buf.width(), buf.height()), (3, 2));
        assert_eq!(&buf.as_bytes()[..4], &[10, 20, 30, 255]);
    }

    #[test]
    fn transparent_pixels_read_as_black() {
        let img = RgbaImage::from_fn(2, 1, |x, _| {
            if x == 0 { Rgba([255, 255, 255, 0]) } else { Rgba([255, 255, 255, 1]) }
        });
        let buf = PixelBuffer::decode(&png(&img)).unwrap();
        assert_eq!(buf.as_bytes(), &[0, 0, 0, 0, 255, 255, 255, 1]);
    }

    #[test]
    fn exif_rotation_is_applied() {
        let img = RgbImage::from_pixel(40, 20, Rgb([90, 120, 60]));

        let plain = PixelBuffer::decode(&jpeg_with_orientation(&img, 1)).unwrap();
        assert_eq!((plain.width(), plain.height()), (40, 20));

        let rotated = PixelBuffer::decode(&jpeg_with_orientation(&img, 6)).unwrap();
        assert_eq!((rotated.width(), rotated.height()), (20, 40));
    }

    #[test]
    fn garbage_is_an_analysis_failure() {
        let err = PixelBuffer::decode(b"definitely not an image").unwrap_err();
        assert!(matches!(err, PetalError::AnalysisFailure { .. }));
    }
}
