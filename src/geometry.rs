use std::{
    cmp::{max, min},
    fmt,
    ops::{Add, Mul, Sub},
};

/// Integer coordinate, all geometry lives on the pixel grid
///
/// Arithmetic on coordinates saturates at the bounds of the type, so huge
/// transforms pin shapes to the edge of the coordinate space instead of
/// wrapping around.
pub type Coord = i32;

/// Clamp wide intermediate value into coordinate range
#[inline]
pub(crate) fn saturate(value: i64) -> Coord {
    value.clamp(Coord::MIN as i64, Coord::MAX as i64) as Coord
}

/// Value representing a 2D point or vector on the pixel grid.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point(pub [Coord; 2]);

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Point([x, y]) = self;
        write!(f, "{},{}", x, y)
    }
}

impl Point {
    #[inline]
    pub const fn new(x: Coord, y: Coord) -> Self {
        Self([x, y])
    }

    /// Get `x` component of the point
    #[inline]
    pub fn x(self) -> Coord {
        self.0[0]
    }

    /// Get `y` component of the point
    #[inline]
    pub fn y(self) -> Coord {
        self.0[1]
    }

    /// Move point by `delta`
    #[inline]
    pub fn translate(self, delta: Point) -> Point {
        self + delta
    }

    /// Scale point relative to the `origin`
    ///
    /// Any factor is accepted, zero collapses the point into the origin and
    /// negative values mirror it.
    #[inline]
    pub fn scale(self, origin: Point, factor: Coord) -> Point {
        let factor = factor as i64;
        let scale = |value: Coord, origin: Coord| {
            let delta = value as i64 - origin as i64;
            saturate((origin as i64).saturating_add(factor.saturating_mul(delta)))
        };
        Point::new(scale(self.x(), origin.x()), scale(self.y(), origin.y()))
    }

    /// Rotate point around the `origin` by `degrees`
    ///
    /// Coordinates are in screen space (`y` grows downwards), so positive angles
    /// turn clockwise on the image. Multiples of 90 degrees are exact, any other
    /// angle is evaluated in floating point and each coordinate is rounded to
    /// the nearest integer with ties going away from zero.
    pub fn rotate(self, origin: Point, degrees: Coord) -> Point {
        let (ox, oy) = (origin.x() as i64, origin.y() as i64);
        let (dx, dy) = (self.x() as i64 - ox, self.y() as i64 - oy);
        let (rx, ry) = match degrees.rem_euclid(360) {
            0 => (dx, dy),
            90 => (-dy, dx),
            180 => (-dx, -dy),
            270 => (dy, -dx),
            degrees => {
                let (sin, cos) = (degrees as f64).to_radians().sin_cos();
                let (dx, dy) = (dx as f64, dy as f64);
                (
                    (dx * cos - dy * sin).round() as i64,
                    (dx * sin + dy * cos).round() as i64,
                )
            }
        };
        Point::new(saturate(ox + rx), saturate(oy + ry))
    }
}

impl From<(Coord, Coord)> for Point {
    #[inline]
    fn from(xy: (Coord, Coord)) -> Self {
        Self([xy.0, xy.1])
    }
}

impl Add for Point {
    type Output = Point;

    #[inline]
    fn add(self, other: Point) -> Self::Output {
        let Point([x0, y0]) = self;
        let Point([x1, y1]) = other;
        Point([x0.saturating_add(x1), y0.saturating_add(y1)])
    }
}

impl Sub for Point {
    type Output = Point;

    #[inline]
    fn sub(self, other: Point) -> Self::Output {
        let Point([x0, y0]) = self;
        let Point([x1, y1]) = other;
        Point([x0.saturating_sub(x1), y0.saturating_sub(y1)])
    }
}

impl Mul<Point> for Coord {
    type Output = Point;

    #[inline]
    fn mul(self, other: Point) -> Self::Output {
        let Point([x, y]) = other;
        Point([self.saturating_mul(x), self.saturating_mul(y)])
    }
}

/// Inclusive bounding box on the pixel grid
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BBox {
    min: Point,
    max: Point,
}

impl BBox {
    /// Construct bounding box which includes both points
    pub fn new(p0: impl Into<Point>, p1: impl Into<Point>) -> Self {
        let Point([x0, y0]) = p0.into();
        let Point([x1, y1]) = p1.into();
        Self {
            min: Point::new(min(x0, x1), min(y0, y1)),
            max: Point::new(max(x0, x1), max(y0, y1)),
        }
    }

    /// Smallest bounding box containing all points, `None` if there are no points
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        points.into_iter().fold(None, |bbox, point| match bbox {
            None => Some(BBox::new(point, point)),
            Some(bbox) => Some(bbox.extend(point)),
        })
    }

    /// Point with minimal coordinates
    #[inline]
    pub fn min(&self) -> Point {
        self.min
    }

    /// Point with maximal coordinates
    #[inline]
    pub fn max(&self) -> Point {
        self.max
    }

    /// Extend bounding box so it includes provided point
    pub fn extend(&self, point: Point) -> Self {
        Self::new(
            (min(self.min.x(), point.x()), min(self.min.y(), point.y())),
            (max(self.max.x(), point.x()), max(self.max.y(), point.y())),
        )
    }

    /// Union of two bounding boxes
    pub fn union(&self, other: BBox) -> Self {
        self.extend(other.min).extend(other.max)
    }

    /// Union with optional bounding box
    pub fn union_opt(&self, other: Option<BBox>) -> Self {
        match other {
            Some(other) => self.union(other),
            None => *self,
        }
    }

    /// Intersection of two bounding boxes, `None` if they do not overlap
    pub fn intersect(&self, other: BBox) -> Option<Self> {
        let min = Point::new(
            max(self.min.x(), other.min.x()),
            max(self.min.y(), other.min.y()),
        );
        let max = Point::new(
            std::cmp::min(self.max.x(), other.max.x()),
            std::cmp::min(self.max.y(), other.max.y()),
        );
        (min.x() <= max.x() && min.y() <= max.y()).then_some(Self { min, max })
    }
}

impl fmt::Debug for BBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BBox({:?} - {:?})", self.min, self.max)
    }
}
