use std::ops::Add;

use eframe::egui::Pos2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Vec2<T> {
    pub x: T,
    pub y: T,
}

pub type Vec2isize = Vec2<isize>;
pub type Vec2usize = Vec2<usize>;
pub type Vec2f = Vec2<f32>;

impl<T> Vec2<T> {
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    pub fn convert<U>(self, f: impl Fn(T) -> U) -> Vec2<U> {
        Vec2 {
            x: f(self.x),
            y: f(self.y),
        }
    }
}

impl Vec2isize {
    /// Converts to unsigned coordinates if both components are non-negative.
    pub fn to_usize(self) -> Option<Vec2usize> {
        Some(Vec2usize {
            x: usize::try_from(self.x).ok()?,
            y: usize::try_from(self.y).ok()?,
        })
    }
}

impl<T: Add<Output = T>> Add for Vec2<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl<T> From<[T; 2]> for Vec2<T> {
    fn from([x, y]: [T; 2]) -> Self {
        Self { x, y }
    }
}

impl<T> From<(T, T)> for Vec2<T> {
    fn from((x, y): (T, T)) -> Self {
        Self { x, y }
    }
}

impl From<Vec2f> for Pos2 {
    fn from(value: Vec2f) -> Self {
        Pos2::new(value.x, value.y)
    }
}

/// Cardinal direction on the pixel grid, y pointing down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    East,
    South,
    West,
    North,
}

impl Direction {
    /// Neighbor probe order used everywhere a cell's four neighbors are checked.
    pub const ALL: [Direction; 4] = [
        Direction::East,
        Direction::South,
        Direction::West,
        Direction::North,
    ];

    pub fn offset(self) -> Vec2isize {
        match self {
            Direction::East => Vec2::new(1, 0),
            Direction::South => Vec2::new(0, 1),
            Direction::West => Vec2::new(-1, 0),
            Direction::North => Vec2::new(0, -1),
        }
    }

    pub fn step(self, pos: Vec2isize) -> Vec2isize {
        pos + self.offset()
    }

    pub fn neighbors(pos: Vec2isize) -> impl Iterator<Item = (Direction, Vec2isize)> {
        Self::ALL.into_iter().map(move |d| (d, d.step(pos)))
    }
}
