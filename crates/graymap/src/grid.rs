//! Row-major sample storage.

/// A `width x height` grid of grayscale samples in row-major order.
///
/// The sample at column `x`, row `y` lives at index `x + y * width`.
/// Samples are `u16` so that unclamped gradient magnitudes fit; values
/// read from a valid image stay in `0..=255`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    samples: Vec<u16>,
}

impl Grid {
    /// Wrap `samples` as a grid.
    ///
    /// # Panics (debug only)
    ///
    /// Debug-asserts that `samples.len() == width * height`.
    pub fn new(width: usize, height: usize, samples: Vec<u16>) -> Self {
        debug_assert_eq!(
            samples.len(),
            width * height,
            "sample count ({}) must match width * height ({}x{}={})",
            samples.len(),
            width,
            height,
            width * height,
        );
        Self {
            width,
            height,
            samples,
        }
    }

    /// A grid with every sample set to `value`.
    pub fn filled(width: usize, height: usize, value: u16) -> Self {
        Self::new(width, height, vec![value; width * height])
    }

    /// A grid whose sample at `(x, y)` is `f(x, y)`.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> u16) -> Self {
        let mut samples = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                samples.push(f(x, y));
            }
        }
        Self::new(width, height, samples)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Linear index of `(x, y)`.
    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        x + y * self.width
    }

    /// Sample at `(x, y)`. Panics when out of bounds.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u16 {
        debug_assert!(x < self.width && y < self.height);
        self.samples[self.index(x, y)]
    }

    #[inline]
    pub fn samples(&self) -> &[u16] {
        &self.samples
    }

    #[inline]
    pub fn samples_mut(&mut self) -> &mut [u16] {
        &mut self.samples
    }

    pub fn into_samples(self) -> Vec<u16> {
        self.samples
    }

    /// Iterate over rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u16]> {
        self.samples.chunks(self.width.max(1))
    }
}
