//! PNG format support.
//!
//! Reads 8-bit and 16-bit grayscale, gray+alpha, RGB, RGBA and palette
//! images and converts them to RGBA8. 16-bit samples keep their high byte.
//! Writes RGBA8 with an sRGB chunk.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use slidefx_core::Image;
use tracing::debug;

use crate::{IoError, IoResult};

/// Reads a PNG file as RGBA8.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<Image> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let mut decoder = ::png::Decoder::new(BufReader::new(file));
    // Palette and sub-byte images become 8-bit gray/RGB(A)
    decoder.set_transformations(::png::Transformations::EXPAND);
    let mut reader = decoder.read_info()
        .map_err(|e: ::png::DecodingError| IoError::DecodeError(e.to_string()))?;

    let buf_size = reader.output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("cannot determine output buffer size".into()))?;
    let mut buf = vec![0u8; buf_size];
    let info = reader.next_frame(&mut buf)
        .map_err(|e: ::png::DecodingError| IoError::DecodeError(e.to_string()))?;
    let raw = &buf[..info.buffer_size()];

    let samples: Vec<u8> = match info.bit_depth {
        ::png::BitDepth::Eight => raw.to_vec(),
        // Big-endian, keep the high byte
        ::png::BitDepth::Sixteen => raw.chunks_exact(2).map(|c| c[0]).collect(),
        depth => return Err(IoError::UnsupportedFormat(format!("bit depth {:?}", depth))),
    };

    let rgba: Vec<u8> = match info.color_type {
        ::png::ColorType::Rgba => samples,
        ::png::ColorType::Rgb => samples
            .chunks_exact(3)
            .flat_map(|p| [p[0], p[1], p[2], 255])
            .collect(),
        ::png::ColorType::Grayscale => samples.iter().flat_map(|&g| [g, g, g, 255]).collect(),
        ::png::ColorType::GrayscaleAlpha => samples
            .chunks_exact(2)
            .flat_map(|ga| [ga[0], ga[0], ga[0], ga[1]])
            .collect(),
        other => return Err(IoError::UnsupportedFormat(format!("color type {:?}", other))),
    };

    debug!(path = %path.display(), width = info.width, height = info.height,
           color = ?info.color_type, "png read");
    Ok(Image::from_rgba8(info.width, info.height, rgba)?)
}

/// Writes an RGBA8 image to a PNG file.
pub fn write<P: AsRef<Path>>(path: P, image: &Image) -> IoResult<()> {
    let path = path.as_ref();
    if image.is_empty() {
        return Err(IoError::EncodeError(format!(
            "cannot encode empty image {}x{}",
            image.width(),
            image.height()
        )));
    }
    let file = File::create(path)?;
    let writer = BufWriter::new(file);

    let mut encoder = ::png::Encoder::new(writer, image.width(), image.height());
    encoder.set_color(::png::ColorType::Rgba);
    encoder.set_depth(::png::BitDepth::Eight);
    encoder.set_compression(::png::Compression::default());
    encoder.set_source_srgb(::png::SrgbRenderingIntent::Perceptual);

    let mut png_writer = encoder.write_header()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    png_writer.write_image_data(image.data())
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    png_writer.finish()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;

    debug!(path = %path.display(), width = image.width(), height = image.height(), "png written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(path: &Path, w: u32, h: u32, color: ::png::ColorType, depth: ::png::BitDepth, data: &[u8]) {
        let file = File::create(path).unwrap();
        let mut enc = ::png::Encoder::new(BufWriter::new(file), w, h);
        enc.set_color(color);
        enc.set_depth(depth);
        let mut wr = enc.write_header().unwrap();
        wr.write_image_data(data).unwrap();
        wr.finish().unwrap();
    }

    #[test]
    fn test_roundtrip_rgba() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rgba.png");
        let mut img = Image::new(16, 8);
        for y in 0..8 {
            for x in 0..16 {
                img.set_pixel(x, y, [(x * 16) as u8, (y * 32) as u8, 64, (x * 8 + y) as u8]).unwrap();
            }
        }
        write(&path, &img).unwrap();
        let loaded = read(&path).unwrap();
        assert!(loaded == img);
    }

    #[test]
    fn test_read_rgb_adds_opaque_alpha() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rgb.png");
        encode(&path, 2, 1, ::png::ColorType::Rgb, ::png::BitDepth::Eight, &[1, 2, 3, 4, 5, 6]);
        let img = read(&path).unwrap();
        assert_eq!(img.data(), &[1, 2, 3, 255, 4, 5, 6, 255]);
    }

    #[test]
    fn test_read_gray_alpha() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ga.png");
        encode(&path, 1, 1, ::png::ColorType::GrayscaleAlpha, ::png::BitDepth::Eight, &[90, 7]);
        assert_eq!(read(&path).unwrap().pixel(0, 0).unwrap(), [90, 90, 90, 7]);
    }

    #[test]
    fn test_read_16bit_keeps_high_byte() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("g16.png");
        encode(&path, 1, 1, ::png::ColorType::Grayscale, ::png::BitDepth::Sixteen, &[0xAB, 0xCD]);
        assert_eq!(read(&path).unwrap().pixel(0, 0).unwrap(), [0xAB, 0xAB, 0xAB, 255]);
    }

    #[test]
    fn test_write_empty_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = write(dir.path().join("e.png"), &Image::new(0, 4)).unwrap_err();
        assert!(matches!(err, IoError::EncodeError(_)));
    }
}
