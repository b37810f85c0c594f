//! Linear intensity stretching onto `0..=255`.

use crate::error::ComputeError;
use crate::grid::Grid;
use crate::header::{Header, MAX_INTENSITY};

/// What to do when every sample has the same value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FlatImagePolicy {
    /// Leave samples and header untouched.
    #[default]
    Skip,
    /// Map every sample to 0 and declare max intensity 255.
    Zero,
    /// Fail with [`ComputeError::FlatImage`].
    Reject,
}

/// Result of a [`scale`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleOutcome {
    /// Samples were stretched from `min..=max` onto `0..=255`.
    Scaled { min: u16, max: u16 },
    /// The image was flat; the policy decided what happened.
    Flat { value: u16 },
}

/// Smallest sample, or 255 if every sample is larger.
pub fn find_min(samples: &[u16]) -> u16 {
    samples
        .iter()
        .fold(u16::from(MAX_INTENSITY), |min, &s| min.min(s))
}

/// Largest sample, or 0 for an empty slice.
pub fn find_max(samples: &[u16]) -> u16 {
    samples.iter().fold(0, |max, &s| max.max(s))
}

/// Stretch `grid` so its darkest sample becomes 0 and its brightest 255.
///
/// Each sample becomes `round(255 * (s - min) / (max - min))`. On success
/// `header.max_intensity` is set to 255.
///
/// # Example
///
/// ```
/// use graymap::{scale, Encoding, FlatImagePolicy, Grid, Header, ScaleOutcome};
///
/// let mut header = Header::new(Encoding::Text, 3, 1, 100);
/// let mut grid = Grid::new(3, 1, vec![20, 60, 100]);
///
/// let outcome = scale(&mut grid, &mut header, FlatImagePolicy::Skip)?;
///
/// assert_eq!(outcome, ScaleOutcome::Scaled { min: 20, max: 100 });
/// assert_eq!(grid.samples(), &[0, 128, 255]);
/// assert_eq!(header.max_intensity, 255);
/// # Ok::<(), graymap::ComputeError>(())
/// ```
pub fn scale(
    grid: &mut Grid,
    header: &mut Header,
    flat: FlatImagePolicy,
) -> Result<ScaleOutcome, ComputeError> {
    let min = find_min(grid.samples());
    let max = find_max(grid.samples());

    if min >= max {
        let value = grid.samples().first().copied().unwrap_or(min);
        return match flat {
            FlatImagePolicy::Skip => Ok(ScaleOutcome::Flat { value }),
            FlatImagePolicy::Zero => {
                grid.samples_mut().fill(0);
                header.max_intensity = MAX_INTENSITY;
                Ok(ScaleOutcome::Flat { value })
            }
            FlatImagePolicy::Reject => Err(ComputeError::FlatImage { value }),
        };
    }

    let range = f64::from(max - min);
    for sample in grid.samples_mut() {
        let fraction = f64::from(*sample - min) / range;
        *sample = (fraction * 255.0).round() as u16;
    }
    header.max_intensity = MAX_INTENSITY;

    Ok(ScaleOutcome::Scaled { min, max })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::Encoding;

    fn header(width: u32, height: u32, max: u8) -> Header {
        Header::new(Encoding::Text, width, height, max)
    }

    #[test]
    fn test_find_min_max() {
        assert_eq!(find_min(&[40, 7, 90]), 7);
        assert_eq!(find_max(&[40, 7, 90]), 90);
    }

    #[test]
    fn test_find_min_starts_at_255() {
        assert_eq!(find_min(&[300, 400]), 255);
        assert_eq!(find_max(&[]), 0);
    }

    #[test]
    fn test_scaled_range_spans_full_byte() {
        let mut grid = Grid::from_fn(4, 4, |x, y| (30 + x * 7 + y * 3) as u16);
        let mut header = header(4, 4, 100);

        let outcome = scale(&mut grid, &mut header, FlatImagePolicy::Skip).unwrap();

        assert_eq!(outcome, ScaleOutcome::Scaled { min: 30, max: 60 });
        assert_eq!(find_min(grid.samples()), 0);
        assert_eq!(find_max(grid.samples()), 255);
        assert_eq!(header.max_intensity, 255);
    }

    #[test]
    fn test_rounding_is_to_nearest() {
        // 1/2 * 255 = 127.5 rounds up
        let mut grid = Grid::new(5, 1, vec![0, 2, 3, 4, 6]);
        let mut header = header(5, 1, 6);
        scale(&mut grid, &mut header, FlatImagePolicy::Skip).unwrap();
        assert_eq!(grid.samples(), &[0, 85, 128, 170, 255]);
    }

    #[test]
    fn test_flat_skip_leaves_image() {
        let mut grid = Grid::filled(3, 3, 42);
        let mut header = header(3, 3, 50);

        let outcome = scale(&mut grid, &mut header, FlatImagePolicy::Skip).unwrap();

        assert_eq!(outcome, ScaleOutcome::Flat { value: 42 });
        assert!(grid.samples().iter().all(|&s| s == 42));
        assert_eq!(header.max_intensity, 50);
    }

    #[test]
    fn test_flat_zero_blanks_image() {
        let mut grid = Grid::filled(2, 2, 9);
        let mut header = header(2, 2, 9);

        scale(&mut grid, &mut header, FlatImagePolicy::Zero).unwrap();

        assert!(grid.samples().iter().all(|&s| s == 0));
        assert_eq!(header.max_intensity, 255);
    }

    #[test]
    fn test_flat_reject() {
        let mut grid = Grid::filled(2, 2, 200);
        let mut header = header(2, 2, 255);

        let err = scale(&mut grid, &mut header, FlatImagePolicy::Reject).unwrap_err();

        assert_eq!(err, ComputeError::FlatImage { value: 200 });
    }
}
