//! graymap: grayscale Netpbm (PGM) images and Sobel edge detection
//!
//! This library validates graymap headers, reads and writes the two sample
//! encodings, stretches intensities and computes gradient-magnitude edge
//! maps. It performs no path handling and never terminates the process;
//! every failure comes back as an [`Error`] with a stable [`ErrorKind`].
//!
//! # Quick Start
//!
//! ```
//! use graymap::{EdgeOptions, FlatImagePolicy, Image, ReadOptions};
//!
//! let pgm = b"P2\n# 4x4 step\n4 4\n15\n0 0 15 15\n0 0 15 15\n0 0 15 15\n0 0 15 15\n";
//! let mut image = Image::read(&mut &pgm[..], &ReadOptions::new())?;
//!
//! image.scale(FlatImagePolicy::Skip)?;
//! let stats = image.detect_edges(&EdgeOptions::new())?;
//!
//! assert_eq!(stats.interior, 4);
//! assert_eq!(image.grid().get(1, 1), 255);
//! # Ok::<(), graymap::Error>(())
//! ```
//!
//! # Pipeline
//!
//! ```text
//! byte stream
//!     |
//!     v
//! parse_header()          magic, comments, width/height, max intensity
//!     |
//!     v
//! SampleCodec             P5: raw bytes | P2: decimal tokens
//!     |
//!     v
//! Grid                    width * height samples, row-major
//!     |
//!     +---> scale()       optional, stretch min..max onto 0..255
//!     |
//!     v
//! detect_edges()          Sobel magnitude, border forced to 0
//!     |
//!     v
//! SampleCodec             same encoding as the input unless overridden
//! ```
//!
//! # Encodings
//!
//! | Magic | [`Encoding`] | Body |
//! |-------|--------------|------|
//! | `P5`  | `Packed`     | one unsigned byte per sample |
//! | `P2`  | `Text`       | whitespace separated decimals; written tab separated, one row per line |
//!
//! Output headers are written on a single line (`P5 640 480 255`), which is
//! valid Netpbm but is not accepted back by [`parse_header`], whose grammar
//! requires the magic number to stand alone on the first line.

pub mod codec;
pub mod edges;
pub mod error;
pub mod grid;
pub mod header;
pub mod image;
pub mod scale;


pub use codec::{Body, PackedCodec, ReadOptions, SampleCodec, TextCodec};
pub use edges::{detect_edges, gradient_at, EdgeOptions, EdgeStats, OverflowPolicy};
pub use error::{BodyError, ComputeError, Error, ErrorKind, FormatError};
pub use grid::Grid;
pub use header::{is_comment, parse_header, Encoding, Header, MAX_INTENSITY};
pub use image::Image;
pub use scale::{find_max, find_min, scale, FlatImagePolicy, ScaleOutcome};
