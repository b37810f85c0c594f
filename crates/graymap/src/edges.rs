//! Sobel gradient-magnitude edge detection.
//!
//! Interior pixels get `round(sqrt(Gx^2 + Gy^2))` over their 3x3
//! neighborhood:
//!
//! ```text
//!        Gx                 Gy
//!   -1   0  +1        -1  -2  -1
//!   -2   0  +2         0   0   0
//!   -1   0  +1        +1  +2  +1
//! ```
//!
//! Pixels in the first or last row or column are set to 0. Every output is
//! computed from the input grid; results go to a separate buffer.

use crate::error::ComputeError;
use crate::grid::Grid;
use crate::header::MAX_INTENSITY;

/// How to handle gradient magnitudes above 255.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OverflowPolicy {
    /// Saturate at 255.
    #[default]
    Clamp,
    /// Keep the raw magnitude (saturating at `u16::MAX`).
    Keep,
    /// Fail with [`ComputeError::GradientOverflow`].
    Reject,
}

/// Edge detection options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeOptions {
    pub overflow: OverflowPolicy,
}

impl EdgeOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn overflow(mut self, policy: OverflowPolicy) -> Self {
        self.overflow = policy;
        self
    }
}

/// Summary of one edge detection pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeStats {
    /// Pixels that had a gradient computed.
    pub interior: usize,
    /// Largest magnitude seen before any clamping.
    pub peak: u32,
    /// Pixels whose magnitude exceeded 255.
    pub overflowed: usize,
}

/// Horizontal and vertical Sobel responses at an interior pixel.
///
/// Panics if `(x, y)` is on the border.
pub fn gradient_at(grid: &Grid, x: usize, y: usize) -> (i64, i64) {
    let p = |x: usize, y: usize| i64::from(grid.get(x, y));

    let gx = p(x + 1, y - 1) + 2 * p(x + 1, y) + p(x + 1, y + 1)
        - p(x - 1, y - 1)
        - 2 * p(x - 1, y)
        - p(x - 1, y + 1);

    let gy = p(x - 1, y + 1) + 2 * p(x, y + 1) + p(x + 1, y + 1)
        - p(x - 1, y - 1)
        - 2 * p(x, y - 1)
        - p(x + 1, y - 1);

    (gx, gy)
}

/// Rounded gradient magnitude at an interior pixel.
#[inline]
fn magnitude_at(grid: &Grid, x: usize, y: usize) -> u32 {
    let (gx, gy) = gradient_at(grid, x, y);
    ((gx * gx + gy * gy) as f64).sqrt().round() as u32
}

/// Run edge detection over `grid`, returning a new grid of the same size.
///
/// # Example
///
/// ```
/// use graymap::{detect_edges, EdgeOptions, Grid};
///
/// // Dark left half, bright right half.
/// let grid = Grid::from_fn(4, 3, |x, _| if x < 2 { 0 } else { 40 });
/// let (edges, stats) = detect_edges(&grid, &EdgeOptions::new())?;
///
/// assert_eq!(edges.get(1, 1), 160);
/// assert_eq!(edges.get(0, 1), 0);
/// assert_eq!(stats.interior, 2);
/// # Ok::<(), graymap::ComputeError>(())
/// ```
pub fn detect_edges(grid: &Grid, options: &EdgeOptions) -> Result<(Grid, EdgeStats), ComputeError> {
    let width = grid.width();
    let height = grid.height();
    let mut out = vec![0u16; grid.len()];
    let mut stats = EdgeStats::default();

    let mut y = 0;
    for (i, slot) in out.iter_mut().enumerate() {
        let x = i % width;
        if i != 0 && x == 0 {
            y += 1;
        }

        let interior = x > 0 && x + 1 < width && y > 0 && y + 1 < height;
        if !interior {
            continue;
        }

        let magnitude = magnitude_at(grid, x, y);
        stats.interior += 1;
        stats.peak = stats.peak.max(magnitude);

        *slot = if magnitude > u32::from(MAX_INTENSITY) {
            stats.overflowed += 1;
            match options.overflow {
                OverflowPolicy::Clamp => u16::from(MAX_INTENSITY),
                OverflowPolicy::Keep => u16::try_from(magnitude).unwrap_or(u16::MAX),
                OverflowPolicy::Reject => {
                    return Err(ComputeError::GradientOverflow { x, y, magnitude });
                }
            }
        } else {
            magnitude as u16
        };
    }

    Ok((Grid::new(width, height, out), stats))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn border_is_zero(grid: &Grid) -> bool {
        let (w, h) = (grid.width(), grid.height());
        (0..w).all(|x| grid.get(x, 0) == 0 && grid.get(x, h - 1) == 0)
            && (0..h).all(|y| grid.get(0, y) == 0 && grid.get(w - 1, y) == 0)
    }

    #[test]
    fn test_uniform_3x3_is_all_zero() {
        let grid = Grid::filled(3, 3, 77);
        let (edges, stats) = detect_edges(&grid, &EdgeOptions::new()).unwrap();
        assert!(edges.samples().iter().all(|&s| s == 0));
        assert_eq!(stats.interior, 1);
        assert_eq!(stats.peak, 0);
    }

    #[test]
    fn test_vertical_step_5x5() {
        // 0 on columns 0-1, 255 on columns 2-4.
        let grid = Grid::from_fn(5, 5, |x, _| if x < 2 { 0 } else { 255 });
        let (edges, _) = detect_edges(&grid, &EdgeOptions::new().overflow(OverflowPolicy::Keep))
            .unwrap();

        // Column 1 and 2 straddle the step: Gx = 4 * 255, Gy = 0.
        for y in 1..4 {
            assert_eq!(edges.get(1, y), 1020);
            assert_eq!(edges.get(2, y), 1020);
            // Column 3 sees only 255s.
            assert_eq!(edges.get(3, y), 0);
        }
        assert!(border_is_zero(&edges));
    }

    #[test]
    fn test_gradient_at_step() {
        let grid = Grid::from_fn(5, 5, |x, _| if x < 2 { 0 } else { 255 });
        assert_eq!(gradient_at(&grid, 2, 2), (1020, 0));
        assert_eq!(gradient_at(&grid, 3, 2), (0, 0));
    }

    #[test]
    fn test_horizontal_step_gives_vertical_gradient() {
        let grid = Grid::from_fn(4, 4, |_, y| if y < 2 { 10 } else { 20 });
        assert_eq!(gradient_at(&grid, 1, 1), (0, 40));
        assert_eq!(gradient_at(&grid, 2, 2), (0, 40));
    }

    #[test]
    fn test_diagonal_magnitude_rounds() {
        // Single bright pixel at (0,0): at (1,1) Gx = -1*p, Gy = -1*p.
        let mut samples = vec![0u16; 9];
        samples[0] = 100;
        let grid = Grid::new(3, 3, samples);
        let (edges, _) = detect_edges(&grid, &EdgeOptions::new()).unwrap();
        // sqrt(100^2 + 100^2) = 141.42
        assert_eq!(edges.get(1, 1), 141);
    }

    #[test]
    fn test_clamp_saturates() {
        let grid = Grid::from_fn(5, 5, |x, _| if x < 2 { 0 } else { 255 });
        let (edges, stats) = detect_edges(&grid, &EdgeOptions::new()).unwrap();
        assert_eq!(edges.get(2, 2), 255);
        assert_eq!(stats.peak, 1020);
        assert_eq!(stats.overflowed, 6);
    }

    #[test]
    fn test_reject_reports_first_overflow() {
        let grid = Grid::from_fn(5, 5, |x, _| if x < 2 { 0 } else { 255 });
        let err = detect_edges(&grid, &EdgeOptions::new().overflow(OverflowPolicy::Reject))
            .unwrap_err();
        assert_eq!(
            err,
            ComputeError::GradientOverflow {
                x: 1,
                y: 1,
                magnitude: 1020
            }
        );
    }

    #[test]
    fn test_border_zero_for_various_sizes() {
        for (w, h) in [(2, 2), (2, 5), (5, 2), (3, 4), (7, 6)] {
            let grid = Grid::from_fn(w, h, |x, y| ((x * 37 + y * 91) % 256) as u16);
            let (edges, _) =
                detect_edges(&grid, &EdgeOptions::new().overflow(OverflowPolicy::Keep)).unwrap();
            assert_eq!((edges.width(), edges.height()), (w, h));
            assert!(border_is_zero(&edges), "border not zero for {w}x{h}");
        }
    }

    #[test]
    fn test_thin_images_are_all_zero() {
        for (w, h) in [(1, 1), (1, 6), (6, 1), (2, 9)] {
            let grid = Grid::from_fn(w, h, |x, y| (x * 50 + y * 30) as u16);
            let (edges, stats) = detect_edges(&grid, &EdgeOptions::new()).unwrap();
            assert!(edges.samples().iter().all(|&s| s == 0));
            assert_eq!(stats.interior, 0);
        }
    }

    #[test]
    fn test_ramp_has_constant_gradient() {
        // Columns step by 2, so right minus left is 4 per row: Gx = 4 * (1 + 2 + 1).
        let grid = Grid::from_fn(6, 4, |x, _| (x * 2) as u16);
        let (edges, _) = detect_edges(&grid, &EdgeOptions::new()).unwrap();
        for y in 1..3 {
            for x in 1..5 {
                assert_eq!(edges.get(x, y), 16, "at ({x}, {y})");
            }
        }
    }
}
