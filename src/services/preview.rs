//! PNG preview export for edge maps.
//!
//! Graymaps are awkward to view on most desktops, so the CLI can also write
//! the result as an 8-bit grayscale PNG. Samples above 255 saturate.

use std::io::Cursor;
use std::path::Path;

use graymap::{Grid, MAX_INTENSITY};

use crate::error::{AppError, PreviewError};

/// Encode a grid as an 8-bit grayscale PNG.
pub fn encode_png(grid: &Grid) -> Result<Vec<u8>, PreviewError> {
    let unsupported = || PreviewError::UnsupportedDimensions {
        width: grid.width(),
        height: grid.height(),
    };
    if grid.is_empty() {
        return Err(unsupported());
    }
    let width = u32::try_from(grid.width()).map_err(|_| unsupported())?;
    let height = u32::try_from(grid.height()).map_err(|_| unsupported())?;

    let pixels: Vec<u8> = grid
        .samples()
        .iter()
        .map(|&s| s.min(u16::from(MAX_INTENSITY)) as u8)
        .collect();

    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(png::ColorType::Grayscale);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Fast);
        let mut writer = encoder
            .write_header()
            .map_err(|e| PreviewError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(&pixels)
            .map_err(|e| PreviewError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}

/// Encode `grid` and write it to `path`.
pub fn write_preview(grid: &Grid, path: &Path) -> Result<(), AppError> {
    let to_error = |source| AppError::Preview {
        path: path.to_path_buf(),
        source,
    };
    let bytes = encode_png(grid).map_err(to_error)?;
    std::fs::write(path, &bytes)
        .map_err(PreviewError::from)
        .map_err(to_error)?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "Wrote PNG preview");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";

    fn decode(bytes: &[u8]) -> (png::OutputInfo, Vec<u8>) {
        let decoder = png::Decoder::new(Cursor::new(bytes));
        let mut reader = decoder.read_info().unwrap();
        let mut buf = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf).unwrap();
        buf.truncate(info.buffer_size());
        (info, buf)
    }

    #[test]
    fn test_encode_png_signature_and_size() {
        let grid = Grid::from_fn(4, 3, |x, y| (x * 60 + y) as u16);
        let bytes = encode_png(&grid).unwrap();
        assert!(bytes.starts_with(PNG_SIGNATURE));

        let (info, pixels) = decode(&bytes);
        assert_eq!((info.width, info.height), (4, 3));
        assert_eq!(info.color_type, png::ColorType::Grayscale);
        assert_eq!(pixels[..4], [0, 60, 120, 180]);
    }

    #[test]
    fn test_encode_png_saturates_wide_samples() {
        let grid = Grid::new(2, 1, vec![1020, 12]);
        let (_, pixels) = decode(&encode_png(&grid).unwrap());
        assert_eq!(pixels, vec![255, 12]);
    }

    #[test]
    fn test_encode_png_rejects_empty_grid() {
        let grid = Grid::new(0, 0, Vec::new());
        assert!(matches!(
            encode_png(&grid),
            Err(PreviewError::UnsupportedDimensions { .. })
        ));
    }

    #[test]
    fn test_write_preview() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("edges.png");
        write_preview(&Grid::filled(3, 3, 7), &path).unwrap();
        assert!(std::fs::read(&path).unwrap().starts_with(PNG_SIGNATURE));
    }
}
