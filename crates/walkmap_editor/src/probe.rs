//! Image dimension probing
//!
//! The one place the image decoder is touched. The session itself never
//! calls into the `image` crate; hosts with their own decoder can supply
//! dimensions through `DocumentSession::image_decoded` instead.

use std::io::Cursor;

/// Decode just the pixel dimensions of an image byte buffer.
pub fn probe_dimensions(bytes: &[u8]) -> Result<(u32, u32), String> {
    let reader = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| e.to_string())?;
    reader.into_dimensions().map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_png_dimensions() {
        let img = image::RgbaImage::from_pixel(7, 5, image::Rgba([0, 0, 0, 255]));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, image::ImageFormat::Png).unwrap();

        assert_eq!(probe_dimensions(&buf.into_inner()), Ok((7, 5)));
    }

    #[test]
    fn test_probe_garbage_fails() {
        assert!(probe_dimensions(b"definitely not an image").is_err());
        assert!(probe_dimensions(&[]).is_err());
    }
}
