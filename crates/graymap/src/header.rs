//! Graymap header parsing and validation.
//!
//! The header is line oriented:
//!
//! ```text
//! P2 | P5                 magic number, nothing else on the line
//! [comment lines]
//! <width> <height>
//! [comment lines]
//! <max intensity>
//! <body>
//! ```
//!
//! A comment line is blank, all whitespace, or has `#` as its first
//! non-whitespace character. Comments are recognized per whole line only; a
//! `#` after data on the same line is trailing data.

use std::fmt;
use std::io::{self, BufRead, Write};

use crate::error::{Error, FormatError};

/// Largest max-intensity value a header may declare.
pub const MAX_INTENSITY: u8 = 255;

/// Body encoding, selected by the magic number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// `P5`: one raw byte per sample.
    Packed,
    /// `P2`: whitespace separated decimal samples.
    Text,
}

impl Encoding {
    /// The magic number written on the first header line.
    pub const fn magic(self) -> &'static str {
        match self {
            Encoding::Packed => "P5",
            Encoding::Text => "P2",
        }
    }

    /// Split a recognized magic number off the front of `line`.
    fn strip_magic(line: &[u8]) -> Option<(Self, &[u8])> {
        match line {
            [b'P', b'5', rest @ ..] => Some((Encoding::Packed, rest)),
            [b'P', b'2', rest @ ..] => Some((Encoding::Text, rest)),
            _ => None,
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.magic())
    }
}

/// Validated image header.
///
/// Width and height are strictly positive and `width * height` fits in
/// `usize`; construct through [`parse_header`] or [`Header::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub encoding: Encoding,
    pub width: u32,
    pub height: u32,
    pub max_intensity: u8,
}

impl Header {
    /// Create a header from already validated values.
    ///
    /// # Panics (debug only)
    ///
    /// Debug-asserts that both dimensions are positive.
    pub fn new(encoding: Encoding, width: u32, height: u32, max_intensity: u8) -> Self {
        debug_assert!(width > 0 && height > 0, "dimensions must be positive");
        Self {
            encoding,
            width,
            height,
            max_intensity,
        }
    }

    /// Number of samples in the body.
    #[inline]
    pub fn image_size(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Write the single-line header used for output files.
    pub fn write_line(&self, writer: &mut dyn Write) -> io::Result<()> {
        writeln!(
            writer,
            "{} {} {} {}",
            self.encoding.magic(),
            self.width,
            self.height,
            self.max_intensity
        )
    }
}

/// Whitespace as a C locale `isspace` sees it (includes vertical tab).
#[inline]
pub(crate) fn is_space(b: u8) -> bool {
    b.is_ascii_whitespace() || b == 0x0b
}

/// True if the line is blank or its first non-whitespace byte is `#`.
pub fn is_comment(line: &[u8]) -> bool {
    for &b in line {
        if b == b'#' {
            return true;
        }
        if !is_space(b) {
            return false;
        }
    }
    true
}

/// Cursor over one header line that extracts integers the way a numeric
/// stream extractor does: leading whitespace skipped, optional sign, then
/// digits up to the first non-digit.
struct Scanner<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn skip_space(&mut self) {
        while self.bytes.get(self.pos).is_some_and(|&b| is_space(b)) {
            self.pos += 1;
        }
    }

    /// Next integer, or `None` if there is no digit or the value overflows.
    fn next_int(&mut self) -> Option<i64> {
        self.skip_space();
        let mut pos = self.pos;
        let negative = match self.bytes.get(pos) {
            Some(b'-') => {
                pos += 1;
                true
            }
            Some(b'+') => {
                pos += 1;
                false
            }
            _ => false,
        };

        let start = pos;
        let mut value: i64 = 0;
        while let Some(&b) = self.bytes.get(pos) {
            if !b.is_ascii_digit() {
                break;
            }
            let digit = i64::from(b - b'0');
            value = value.checked_mul(10)?;
            value = if negative {
                value.checked_sub(digit)?
            } else {
                value.checked_add(digit)?
            };
            pos += 1;
        }
        if pos == start {
            return None;
        }

        self.pos = pos;
        Some(value)
    }

    fn only_space_left(&mut self) -> bool {
        self.skip_space();
        self.pos == self.bytes.len()
    }
}

/// Reads header lines and tracks the current line number.
struct LineReader<'r, R: BufRead + ?Sized> {
    reader: &'r mut R,
    line_no: usize,
    buf: Vec<u8>,
}

impl<'r, R: BufRead + ?Sized> LineReader<'r, R> {
    fn new(reader: &'r mut R) -> Self {
        Self {
            reader,
            line_no: 0,
            buf: Vec::new(),
        }
    }

    /// Read the next line into `buf` without its terminator.
    ///
    /// Returns `false` at end of input, with `buf` left empty.
    fn next_line(&mut self) -> Result<bool, Error> {
        self.buf.clear();
        let read = self
            .reader
            .read_until(b'\n', &mut self.buf)
            .map_err(Error::HeaderIo)?;
        if read == 0 {
            return Ok(false);
        }
        self.line_no += 1;
        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
            if self.buf.last() == Some(&b'\r') {
                self.buf.pop();
            }
        }
        Ok(true)
    }

    /// Advance to the first non-comment line.
    ///
    /// Returns the line number the content is (or would have been) on. At end
    /// of input `buf` is empty, so the caller's integer parse fails there.
    fn next_content_line(&mut self) -> Result<usize, Error> {
        while self.next_line()? {
            if !is_comment(&self.buf) {
                return Ok(self.line_no);
            }
        }
        Ok(self.line_no + 1)
    }
}

/// Parse and validate a header, leaving `reader` at the first body byte.
///
/// # Example
///
/// ```
/// use graymap::{parse_header, Encoding};
///
/// let mut input: &[u8] = b"P2\n# made by hand\n4 3\n255\n";
/// let header = parse_header(&mut input)?;
///
/// assert_eq!(header.encoding, Encoding::Text);
/// assert_eq!((header.width, header.height), (4, 3));
/// assert_eq!(header.image_size(), 12);
/// # Ok::<(), graymap::Error>(())
/// ```
pub fn parse_header<R: BufRead + ?Sized>(reader: &mut R) -> Result<Header, Error> {
    let mut lines = LineReader::new(reader);

    // Magic number line
    lines.next_line()?;
    let magic_line = lines.line_no.max(1);
    let trimmed = {
        let start = lines
            .buf
            .iter()
            .position(|&b| !is_space(b))
            .unwrap_or(lines.buf.len());
        &lines.buf[start..]
    };
    let (encoding, rest) = Encoding::strip_magic(trimmed).ok_or_else(|| {
        let token_end = trimmed
            .iter()
            .position(|&b| is_space(b))
            .unwrap_or(trimmed.len());
        FormatError::UnknownMagic {
            line: magic_line,
            found: String::from_utf8_lossy(&trimmed[..token_end]).into_owned(),
        }
    })?;
    if !rest.iter().all(|&b| is_space(b)) {
        return Err(FormatError::TrailingDataAfterMagic { line: magic_line }.into());
    }

    // Dimensions line
    let line = lines.next_content_line()?;
    let mut scanner = Scanner::new(&lines.buf);
    let width = scanner
        .next_int()
        .ok_or(FormatError::MissingWidth { line })?;
    let height = scanner
        .next_int()
        .ok_or(FormatError::MissingHeight { line })?;
    if !scanner.only_space_left() {
        return Err(FormatError::TrailingDataAfterDimensions { line }.into());
    }
    if width <= 0 || height <= 0 {
        return Err(FormatError::NonPositiveDimension {
            line,
            width,
            height,
        }
        .into());
    }
    let too_large = FormatError::DimensionsTooLarge {
        line,
        width,
        height,
    };
    let (width, height) = match (u32::try_from(width), u32::try_from(height)) {
        (Ok(w), Ok(h)) if (w as usize).checked_mul(h as usize).is_some() => (w, h),
        _ => return Err(too_large.into()),
    };

    // Max intensity line
    let line = lines.next_content_line()?;
    let mut scanner = Scanner::new(&lines.buf);
    let max_value = scanner
        .next_int()
        .ok_or(FormatError::MissingMaxValue { line })?;
    if !scanner.only_space_left() {
        return Err(FormatError::TrailingDataAfterMaxValue { line }.into());
    }
    let max_intensity = u8::try_from(max_value).map_err(|_| FormatError::MaxValueOutOfRange {
        line,
        value: max_value,
    })?;

    Ok(Header::new(encoding, width, height, max_intensity))
}
