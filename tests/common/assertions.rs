//! Assertion helpers for tests.

use pretty_assertions::assert_eq;

use super::workspace::CliOutput;

/// Assert the CLI exited with `expected`
pub fn assert_exit(output: &CliOutput, expected: u8) {
    assert_eq!(
        output.code,
        Some(i32::from(expected)),
        "Unexpected exit status. stdout: {} stderr: {}",
        output.stdout,
        output.stderr
    );
}

/// Assert the CLI succeeded
pub fn assert_success(output: &CliOutput) {
    assert_exit(output, 0);
}

/// Assert `bytes` is a PNG file
pub fn assert_png(bytes: &[u8]) {
    assert!(
        bytes.starts_with(b"\x89PNG\r\n\x1a\n"),
        "Expected PNG image, got {} bytes starting with {:?}",
        bytes.len(),
        &bytes[..8.min(bytes.len())]
    );
}

/// Assert a packed output file has the given header line and samples
pub fn assert_packed(bytes: &[u8], header: &[u8], samples: &[u8]) {
    assert!(
        bytes.starts_with(header),
        "Expected header {:?}, got {:?}",
        String::from_utf8_lossy(header),
        String::from_utf8_lossy(&bytes[..header.len().min(bytes.len())])
    );
    assert_eq!(&bytes[header.len()..], samples);
}

/// Split a text body into rows of samples
pub fn text_rows(body: &str) -> Vec<Vec<u16>> {
    body.split('\n')
        .map(|line| {
            line.split('\t')
                .filter(|t| !t.is_empty())
                .map(|t| t.parse().expect("sample is not a number"))
                .collect()
        })
        .collect()
}
