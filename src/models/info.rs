use graymap::{find_max, find_min, Image};
use serde::Serialize;

/// Summary of a validated image, printed by `edgemap info`
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct ImageInfo {
    pub encoding: String,
    pub width: u32,
    pub height: u32,
    pub max_intensity: u8,
    pub pixels: usize,
    pub min_sample: u16,
    pub max_sample: u16,
    /// Data found after the declared pixels
    pub surplus: usize,
}

impl ImageInfo {
    pub fn from_image(image: &Image) -> Self {
        let header = image.header();
        let samples = image.grid().samples();
        Self {
            encoding: header.encoding.magic().to_string(),
            width: header.width,
            height: header.height,
            max_intensity: header.max_intensity,
            pixels: header.image_size(),
            min_sample: find_min(samples),
            max_sample: find_max(samples),
            surplus: image.surplus(),
        }
    }

    /// Human-readable multi-line summary
    pub fn to_text(&self) -> String {
        let mut text = format!(
            "Encoding:      {}\nSize:          {}x{} ({} pixels)\nMax intensity: {}\nSample range:  {}..={}",
            self.encoding,
            self.width,
            self.height,
            self.pixels,
            self.max_intensity,
            self.min_sample,
            self.max_sample
        );
        if self.surplus > 0 {
            text.push_str(&format!("\nSurplus data:  {}", self.surplus));
        }
        text
    }
}
