//! Test fixtures: small graymaps with known edge maps.

/// 5x5 text image, dark columns 0-1 and bright columns 2-4
pub const STEP_5X5_TEXT: &[u8] = b"P2\n\
# vertical step edge\n\
5 5\n\
255\n\
0 0 255 255 255\n\
0 0 255 255 255\n\
0 0 255 255 255\n\
0 0 255 255 255\n\
0 0 255 255 255\n";

/// Edge map of [`STEP_5X5_TEXT`] with magnitudes clamped to 255
pub const STEP_5X5_EDGES: &str = "P2 5 5 255\n\
0\t0\t0\t0\t0\t\n\
0\t255\t255\t0\t0\t\n\
0\t255\t255\t0\t0\t\n\
0\t255\t255\t0\t0\t\n\
0\t0\t0\t0\t0\t";

/// 4x3 packed image, dark left half, samples 0 and 40
pub const STEP_4X3_PACKED: &[u8] = b"P5\n4 3\n40\n\
\x00\x00\x28\x28\
\x00\x00\x28\x28\
\x00\x00\x28\x28";

/// Samples of the edge map of [`STEP_4X3_PACKED`]
pub const STEP_4X3_EDGES: [u8; 12] = [0, 0, 0, 0, 0, 160, 160, 0, 0, 0, 0, 0];

/// Two pixels spanning 10..50 of a 0..50 range
pub const NARROW_RANGE_TEXT: &[u8] = b"P2\n2 1\n50\n10 50\n";

/// Every pixel the same
pub const FLAT_TEXT: &[u8] = b"P2\n3 3\n255\n7 7 7\n7 7 7\n7 7 7\n";

/// Declares four pixels, carries two
pub const TRUNCATED_PACKED: &[u8] = b"P5\n2 2\n255\n\x01\x02";

/// Magic number that is neither P2 nor P5
pub const UNKNOWN_MAGIC: &[u8] = b"P6\n2 2\n255\n";

/// Text body with one sample too many
pub const SURPLUS_TEXT: &[u8] = b"P2\n2 1\n255\n1 2 3\n";

/// Prepend `P2`/`P5` header lines to a body
pub fn with_header(magic: &str, width: u32, height: u32, max: u32, body: &[u8]) -> Vec<u8> {
    let mut bytes = format!("{magic}\n{width} {height}\n{max}\n").into_bytes();
    bytes.extend_from_slice(body);
    bytes
}

/// Output header line as written by edgemap
pub fn output_header(magic: &str, width: u32, height: u32, max: u32) -> Vec<u8> {
    format!("{magic} {width} {height} {max}\n").into_bytes()
}
