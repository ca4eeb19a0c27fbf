use image::{Rgba, RgbaImage};

use crate::{
    pixel::{PixelClass, ERASED},
    vector::{Vec2isize, Vec2usize},
};

/// Scratch copy of the source image that extraction reads from and erases into.
#[derive(Debug, Clone)]
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    pub fn new(image: &RgbaImage) -> Self {
        Self {
            image: image.clone(),
        }
    }

    pub fn width(&self) -> usize {
        self.image.width() as usize
    }

    pub fn height(&self) -> usize {
        self.image.height() as usize
    }

    pub fn in_bounds(&self, pos: Vec2isize) -> Option<Vec2usize> {
        let pos = pos.to_usize()?;
        (pos.x < self.width() && pos.y < self.height()).then_some(pos)
    }

    pub fn get(&self, pos: Vec2isize) -> Option<Rgba<u8>> {
        let pos = self.in_bounds(pos)?;
        Some(*self.image.get_pixel(pos.x as u32, pos.y as u32))
    }

    /// Class of the pixel at `pos`, or `None` outside the image.
    pub fn class(&self, pos: Vec2isize) -> Option<PixelClass> {
        self.get(pos).map(PixelClass::of)
    }

    pub fn erase(&mut self, pos: Vec2isize) {
        if let Some(pos) = self.in_bounds(pos) {
            self.image.put_pixel(pos.x as u32, pos.y as u32, ERASED);
        }
    }

    /// Every coordinate in raster order.
    pub fn positions(&self) -> impl Iterator<Item = Vec2isize> + 'static {
        let (width, height) = (self.width() as isize, self.height() as isize);
        (0..height).flat_map(move |y| (0..width).map(move |x| Vec2isize::new(x, y)))
    }
}
