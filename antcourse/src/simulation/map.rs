use macroquad::texture::Image;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::SimError;

/// An opaque pixel color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Rgb(r, g, b)
    }
}

/// The course the ants run on: a read-only raster in which one exact color
/// marks impassable boundary and every other color is passable.
#[derive(Debug, Clone)]
pub struct CourseMap {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
    boundary: Rgb,
    pub loaded_map_name: Option<String>,
}

impl CourseMap {
    fn from_pixels(
        width: usize,
        height: usize,
        pixels: Vec<Rgb>,
        boundary: Rgb,
    ) -> Result<Self, SimError> {
        // Clamped sampling needs at least one pixel to land on.
        if width == 0 || height == 0 {
            return Err(SimError::EmptyMap { width, height });
        }
        Ok(Self {
            width,
            height,
            pixels,
            boundary,
            loaded_map_name: None,
        })
    }

    /// A course of the given size painted entirely with `fill`.
    pub fn filled(width: usize, height: usize, fill: Rgb, boundary: Rgb) -> Result<Self, SimError> {
        Self::from_pixels(width, height, vec![fill; width * height], boundary)
    }

    /// Decode an encoded image (PNG, BMP, ...) into a course.
    pub fn from_image_bytes(bytes: &[u8], boundary: Rgb) -> Result<Self, SimError> {
        let image = Image::from_file_with_format(bytes, None)
            .map_err(|e| SimError::ImageDecode(format!("{:?}", e)))?;
        let pixels = image
            .bytes
            .chunks_exact(4)
            .map(|px| Rgb(px[0], px[1], px[2]))
            .collect();
        Self::from_pixels(image.width(), image.height(), pixels, boundary)
    }

    /// Load a course image from disk. A missing, unreadable or empty map is fatal.
    pub fn load_map<P: AsRef<Path>>(path: P, boundary: Rgb) -> Result<Self, SimError> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|source| SimError::MapLoad {
            path: path.to_path_buf(),
            source,
        })?;
        let mut map = Self::from_image_bytes(&data, boundary).map_err(|err| match err {
            SimError::ImageDecode(reason) => SimError::MapDecode {
                path: path.to_path_buf(),
                reason,
            },
            other => other,
        })?;

        info!(
            path = %path.display(),
            width = map.width,
            height = map.height,
            "Loaded course map"
        );
        map.loaded_map_name = Some(path.to_string_lossy().to_string());
        Ok(map)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn boundary_color(&self) -> Rgb {
        self.boundary
    }

    #[inline(always)]
    pub fn sample(&self, x: usize, y: usize) -> Option<Rgb> {
        if x < self.width && y < self.height {
            return Some(self.pixels[y * self.width + x]);
        }
        None
    }

    /// Sample after clamping the coordinates onto the raster, so rays and
    /// corners leaving the course read the nearest edge pixel.
    #[inline(always)]
    pub fn sample_clamped(&self, x: i64, y: i64) -> Rgb {
        let cx = x.clamp(0, self.width as i64 - 1) as usize;
        let cy = y.clamp(0, self.height as i64 - 1) as usize;
        self.pixels[cy * self.width + cx]
    }

    #[inline(always)]
    pub fn is_boundary(&self, color: Rgb) -> bool {
        color == self.boundary
    }

    #[inline(always)]
    pub fn is_boundary_at(&self, x: i64, y: i64) -> bool {
        self.is_boundary(self.sample_clamped(x, y))
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, color: Rgb) -> bool {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = color;
            return true;
        }
        false
    }

    /// Paint an axis-aligned rectangle, cropped to the raster.
    pub fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: Rgb) {
        let max_x = (x + w).min(self.width);
        let max_y = (y + h).min(self.height);
        for py in y..max_y {
            for px in x..max_x {
                self.pixels[py * self.width + px] = color;
            }
        }
    }

    /// Paint the boundary color around the outer edge of the raster.
    pub fn outline(&mut self, thickness: usize) {
        let boundary = self.boundary;
        let (w, h) = (self.width, self.height);
        self.fill_rect(0, 0, w, thickness, boundary);
        self.fill_rect(0, h.saturating_sub(thickness), w, thickness, boundary);
        self.fill_rect(0, 0, thickness, h, boundary);
        self.fill_rect(w.saturating_sub(thickness), 0, thickness, h, boundary);
    }

    /// RGBA bytes, row-major, for uploading the course as a texture.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|&Rgb(r, g, b)| [r, g, b, 255])
            .collect()
    }
}
