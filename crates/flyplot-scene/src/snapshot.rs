//! Framebuffer snapshots for image export.

use flyplot_core::Color;

/// An RGBA8 image read back from the renderer, rows top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    width: usize,
    height: usize,
    pixels: Vec<[u8; 4]>,
}

impl Snapshot {
    /// Wrap tightly packed RGBA8 bytes. Returns `None` if the length does
    /// not match `width * height * 4`.
    pub fn from_rgba8(width: usize, height: usize, bytes: &[u8]) -> Option<Self> {
        if bytes.len() != width.checked_mul(height)?.checked_mul(4)? {
            return None;
        }
        let pixels: &[[u8; 4]] = bytemuck::cast_slice(bytes);
        Some(Self {
            width,
            height,
            pixels: pixels.to_vec(),
        })
    }

    /// A `width` x `height` image filled with `color`.
    pub fn filled(width: usize, height: usize, color: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![color.to_rgba8(); width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        (x < self.width && y < self.height).then(|| self.pixels[y * self.width + x])
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, rgba: [u8; 4]) {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = rgba;
        }
    }

    /// The raw RGBA8 bytes.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    fn row(&self, y: usize) -> &[[u8; 4]] {
        &self.pixels[y * self.width..(y + 1) * self.width]
    }

    /// The smallest sub-image holding every pixel that differs from
    /// `background`.
    ///
    /// Returns `None` unless the result is more than one pixel wide and
    /// more than one pixel tall, which covers an empty plot.
    pub fn crop_to_content(&self, background: Color) -> Option<Snapshot> {
        let bg = background.to_rgba8();
        let row_has_content = |y: usize| self.row(y).iter().any(|p| *p != bg);

        let top = (0..self.height).find(|&y| row_has_content(y))?;
        let bottom = (top..self.height).rev().find(|&y| row_has_content(y))?;

        let col_has_content = |x: usize| (top..=bottom).any(|y| self.pixels[y * self.width + x] != bg);
        let left = (0..self.width).find(|&x| col_has_content(x))?;
        let right = (left..self.width).rev().find(|&x| col_has_content(x))?;

        let (width, height) = (right - left + 1, bottom - top + 1);
        if width <= 1 || height <= 1 {
            return None;
        }

        let pixels = (top..=bottom)
            .flat_map(|y| self.row(y)[left..=right].iter().copied())
            .collect();
        Some(Snapshot {
            width,
            height,
            pixels,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INK: [u8; 4] = [0, 0, 255, 255];

    #[test]
    fn test_crop_to_content() {
        let mut img = Snapshot::filled(10, 8, Color::WHITE);
        img.set_pixel(2, 3, INK);
        img.set_pixel(6, 5, INK);

        let cropped = img.crop_to_content(Color::WHITE).unwrap();
        assert_eq!((cropped.width(), cropped.height()), (5, 3));
        assert_eq!(cropped.pixel(0, 0), Some(INK));
        assert_eq!(cropped.pixel(4, 2), Some(INK));
        assert_eq!(cropped.pixel(4, 0), Some(Color::WHITE.to_rgba8()));
    }

    #[test]
    fn test_empty_plot_is_none() {
        let img = Snapshot::filled(10, 8, Color::WHITE);
        assert!(img.crop_to_content(Color::WHITE).is_none());
    }

    #[test]
    fn test_single_line_is_none() {
        let mut img = Snapshot::filled(10, 8, Color::WHITE);
        for x in 1..9 {
            img.set_pixel(x, 4, INK);
        }
        assert!(img.crop_to_content(Color::WHITE).is_none());
    }

    #[test]
    fn test_from_rgba8() {
        let bytes = [255u8; 2 * 3 * 4];
        let img = Snapshot::from_rgba8(2, 3, &bytes).unwrap();
        assert_eq!(img.as_bytes(), &bytes[..]);
        assert!(Snapshot::from_rgba8(2, 2, &bytes).is_none());
    }
}
