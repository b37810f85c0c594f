//! A header and its samples, read and written as a unit.

use std::io::{BufRead, Write};

use crate::codec::ReadOptions;
use crate::edges::{detect_edges, EdgeOptions, EdgeStats};
use crate::error::{BodyError, ComputeError, Error};
use crate::grid::Grid;
use crate::header::{parse_header, Encoding, Header, MAX_INTENSITY};
use crate::scale::{scale, FlatImagePolicy, ScaleOutcome};

/// A decoded graymap.
///
/// # Example
///
/// ```
/// use graymap::{EdgeOptions, Image, ReadOptions};
///
/// let mut input: &[u8] = b"P2\n# uniform\n3 3\n255\n9 9 9\n9 9 9\n9 9 9\n";
/// let mut image = Image::read(&mut input, &ReadOptions::new())?;
/// image.detect_edges(&EdgeOptions::new())?;
///
/// let mut out = Vec::new();
/// image.write(&mut out)?;
/// assert_eq!(out, b"P2 3 3 255\n0\t0\t0\t\n0\t0\t0\t\n0\t0\t0\t");
/// # Ok::<(), graymap::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    header: Header,
    grid: Grid,
    surplus: usize,
}

impl Image {
    /// Pair a header with a grid of matching size.
    ///
    /// # Panics (debug only)
    ///
    /// Debug-asserts that the grid has the header's dimensions.
    pub fn new(header: Header, grid: Grid) -> Self {
        debug_assert_eq!(
            (grid.width(), grid.height()),
            (header.width as usize, header.height as usize),
            "grid dimensions must match the header"
        );
        Self {
            header,
            grid,
            surplus: 0,
        }
    }

    /// Parse the header, then read exactly `width * height` samples with the
    /// codec its magic number selects.
    pub fn read<R: BufRead>(reader: &mut R, options: &ReadOptions) -> Result<Self, Error> {
        let header = parse_header(reader)?;
        let body = header
            .encoding
            .codec()
            .read_samples(reader, &header, options)?;
        let grid = Grid::new(
            header.width as usize,
            header.height as usize,
            body.samples,
        );
        Ok(Self {
            header,
            grid,
            surplus: body.surplus,
        })
    }

    /// Write header line and body in the image's own encoding.
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<(), Error> {
        self.write_as(writer, self.header.encoding)
    }

    /// Write header line and body in `encoding`.
    pub fn write_as<W: Write>(&self, writer: &mut W, encoding: Encoding) -> Result<(), Error> {
        let header = Header {
            encoding,
            ..self.header
        };
        let codec = encoding.codec();
        // Nothing is written unless the whole body can be encoded
        codec.check(&self.grid)?;
        header.write_line(writer).map_err(BodyError::Io)?;
        codec.write_samples(writer, &self.grid)?;
        writer.flush().map_err(BodyError::Io)?;
        Ok(())
    }

    /// Stretch intensities onto `0..=255`. See [`scale`].
    pub fn scale(&mut self, flat: FlatImagePolicy) -> Result<ScaleOutcome, ComputeError> {
        scale(&mut self.grid, &mut self.header, flat)
    }

    /// Replace the samples with their edge magnitudes. See [`detect_edges`].
    ///
    /// Magnitudes are not bounded by the input's max intensity, so the
    /// header is widened to 255.
    pub fn detect_edges(&mut self, options: &EdgeOptions) -> Result<EdgeStats, ComputeError> {
        let (edges, stats) = detect_edges(&self.grid, options)?;
        self.grid = edges;
        self.header.max_intensity = MAX_INTENSITY;
        Ok(stats)
    }

    #[inline]
    pub fn header(&self) -> &Header {
        &self.header
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Data found after the declared body when it was read.
    #[inline]
    pub fn surplus(&self) -> usize {
        self.surplus
    }

    pub fn into_parts(self) -> (Header, Grid) {
        (self.header, self.grid)
    }
}
