//! Body codecs for the two sample encodings.
//!
//! Header handling is shared; only the body differs. [`PackedCodec`] stores
//! one raw byte per sample, [`TextCodec`] stores whitespace separated
//! decimals. Both implement [`SampleCodec`], and [`Encoding::codec()`] picks
//! the right one for a header.

use std::io::{self, BufRead, Read, Write};

use crate::error::BodyError;
use crate::grid::Grid;
use crate::header::{is_space, Encoding, Header};

/// Options for reading a body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadOptions {
    /// Reject input that continues past the declared sample count.
    ///
    /// When disabled (the default) surplus data is counted and reported
    /// in [`Body::surplus`] but otherwise ignored.
    pub strict_body: bool,
}

impl ReadOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn strict_body(mut self, strict: bool) -> Self {
        self.strict_body = strict;
        self
    }
}

/// Samples read from a body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Body {
    /// Exactly `header.image_size()` samples.
    pub samples: Vec<u16>,
    /// Samples (text) or bytes (packed) found after the declared body.
    pub surplus: usize,
}

/// Read/write strategy for one body encoding.
pub trait SampleCodec {
    /// The encoding this codec handles.
    fn encoding(&self) -> Encoding;

    /// Read `header.image_size()` samples from `reader`.
    fn read_samples(
        &self,
        reader: &mut dyn BufRead,
        header: &Header,
        options: &ReadOptions,
    ) -> Result<Body, BodyError>;

    /// Verify that every sample of `grid` can be encoded.
    fn check(&self, _grid: &Grid) -> Result<(), BodyError> {
        Ok(())
    }

    /// Write every sample of `grid`. The header line is not included.
    fn write_samples(&self, writer: &mut dyn Write, grid: &Grid) -> Result<(), BodyError>;
}

impl Encoding {
    /// The codec for this encoding.
    pub fn codec(self) -> &'static dyn SampleCodec {
        match self {
            Encoding::Packed => &PackedCodec,
            Encoding::Text => &TextCodec,
        }
    }
}

fn check_surplus(expected: usize, surplus: usize, options: &ReadOptions) -> Result<(), BodyError> {
    if options.strict_body && surplus > 0 {
        return Err(BodyError::TrailingSamples {
            expected,
            extra: surplus,
        });
    }
    Ok(())
}

/// `P5` bodies: one unsigned byte per sample.
#[derive(Debug, Clone, Copy, Default)]
pub struct PackedCodec;

impl SampleCodec for PackedCodec {
    fn encoding(&self) -> Encoding {
        Encoding::Packed
    }

    fn read_samples(
        &self,
        reader: &mut dyn BufRead,
        header: &Header,
        options: &ReadOptions,
    ) -> Result<Body, BodyError> {
        let expected = header.image_size();
        let mut bytes = Vec::with_capacity(expected);
        Read::take(&mut *reader, expected as u64).read_to_end(&mut bytes)?;
        if bytes.len() < expected {
            return Err(BodyError::Truncated {
                expected,
                found: bytes.len(),
            });
        }

        let surplus = io::copy(reader, &mut io::sink())? as usize;
        check_surplus(expected, surplus, options)?;

        Ok(Body {
            samples: bytes.into_iter().map(u16::from).collect(),
            surplus,
        })
    }

    fn check(&self, grid: &Grid) -> Result<(), BodyError> {
        match grid.samples().iter().position(|&s| s > u16::from(u8::MAX)) {
            Some(index) => Err(BodyError::SampleOutOfRange {
                index,
                value: grid.samples()[index],
            }),
            None => Ok(()),
        }
    }

    fn write_samples(&self, writer: &mut dyn Write, grid: &Grid) -> Result<(), BodyError> {
        let bytes = grid
            .samples()
            .iter()
            .enumerate()
            .map(|(index, &value)| {
                u8::try_from(value).map_err(|_| BodyError::SampleOutOfRange { index, value })
            })
            .collect::<Result<Vec<u8>, _>>()?;
        writer.write_all(&bytes)?;
        Ok(())
    }
}

/// `P2` bodies: whitespace separated decimal samples.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextCodec;

impl SampleCodec for TextCodec {
    fn encoding(&self) -> Encoding {
        Encoding::Text
    }

    fn read_samples(
        &self,
        reader: &mut dyn BufRead,
        header: &Header,
        options: &ReadOptions,
    ) -> Result<Body, BodyError> {
        let expected = header.image_size();
        let mut text = Vec::new();
        reader.read_to_end(&mut text)?;

        let mut tokens = text
            .split(|&b| is_space(b))
            .filter(|t| !t.is_empty());

        let mut samples = Vec::with_capacity(expected);
        for index in 0..expected {
            let token = tokens.next().ok_or(BodyError::Truncated {
                expected,
                found: index,
            })?;
            let value = std::str::from_utf8(token)
                .ok()
                .and_then(|s| s.parse::<u16>().ok())
                .ok_or_else(|| BodyError::InvalidSample {
                    index,
                    token: String::from_utf8_lossy(token).into_owned(),
                })?;
            samples.push(value);
        }

        let surplus = tokens.count();
        check_surplus(expected, surplus, options)?;

        Ok(Body { samples, surplus })
    }

    fn write_samples(&self, writer: &mut dyn Write, grid: &Grid) -> Result<(), BodyError> {
        let width = grid.width();
        for (i, sample) in grid.samples().iter().enumerate() {
            if i != 0 && i % width == 0 {
                writer.write_all(b"\n")?;
            }
            write!(writer, "{sample}\t")?;
        }
        Ok(())
    }
}
