//! Shape model
//!
//! Every supported element becomes one of four variants. Circles, rectangles
//! and lines have no variant of their own, they are built by constructors
//! on top of ellipse, polygon and polyline respectively.
use crate::{BBox, Canvas, Color, Coord, Point, geometry::saturate};

/// Drawable shape with a color and integer geometry
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "type", rename_all = "snake_case")
)]
pub enum Shape {
    /// Axis aligned filled ellipse
    Ellipse {
        fill: Color,
        center: Point,
        radii: Point,
    },
    /// Filled polygon, last point is connected to the first one
    Polygon { fill: Color, points: Vec<Point> },
    /// Open chain of line segments
    Polyline { stroke: Color, points: Vec<Point> },
    /// Ordered list of exclusively owned children
    ///
    /// Group color is never drawn, it is only carried along on duplication.
    Group { fill: Color, children: Vec<Shape> },
}

impl Shape {
    pub fn ellipse(fill: Color, center: Point, radii: Point) -> Self {
        Shape::Ellipse {
            fill,
            center,
            radii,
        }
    }

    /// Ellipse with equal radii
    pub fn circle(fill: Color, center: Point, radius: Coord) -> Self {
        Self::ellipse(fill, center, Point::new(radius, radius))
    }

    pub fn polygon(fill: Color, points: Vec<Point>) -> Self {
        Shape::Polygon { fill, points }
    }

    /// Rectangle covering `width x height` pixels starting at `upper_left`
    ///
    /// Corners go clockwise (on screen) starting from the upper left one:
    /// upper left, upper right, lower right, lower left.
    pub fn rect(fill: Color, upper_left: Point, width: Coord, height: Coord) -> Self {
        let Point([x, y]) = upper_left;
        let right = saturate(x as i64 + width as i64 - 1);
        let bottom = saturate(y as i64 + height as i64 - 1);
        Self::polygon(
            fill,
            vec![
                upper_left,
                Point::new(right, y),
                Point::new(right, bottom),
                Point::new(x, bottom),
            ],
        )
    }

    pub fn polyline(stroke: Color, points: Vec<Point>) -> Self {
        Shape::Polyline { stroke, points }
    }

    /// Polyline with exactly two points
    pub fn line(stroke: Color, p0: Point, p1: Point) -> Self {
        Self::polyline(stroke, vec![p0, p1])
    }

    pub fn group(children: Vec<Shape>) -> Self {
        Shape::Group {
            fill: Color::WHITE,
            children,
        }
    }

    /// Fill or stroke color of the shape
    pub fn color(&self) -> Color {
        match self {
            Shape::Ellipse { fill, .. } => *fill,
            Shape::Polygon { fill, .. } => *fill,
            Shape::Polyline { stroke, .. } => *stroke,
            Shape::Group { fill, .. } => *fill,
        }
    }

    /// Name of the shape kind, used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Ellipse { .. } => "ellipse",
            Shape::Polygon { .. } => "polygon",
            Shape::Polyline { .. } => "polyline",
            Shape::Group { .. } => "group",
        }
    }

    /// Render shape onto the canvas
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        match self {
            Shape::Ellipse {
                fill,
                center,
                radii,
            } => canvas.draw_ellipse(*center, *radii, *fill),
            Shape::Polygon { fill, points } => canvas.draw_polygon(points, *fill),
            Shape::Polyline { stroke, points } => {
                for segment in points.windows(2) {
                    canvas.draw_line(segment[0], segment[1], *stroke);
                }
            }
            Shape::Group { children, .. } => {
                for child in children {
                    child.draw(canvas);
                }
            }
        }
    }

    /// Move shape by `delta`
    pub fn translate(&mut self, delta: Point) {
        self.map_points(&|point| point.translate(delta));
    }

    /// Scale shape relative to the `origin`
    ///
    /// Ellipse radii are multiplied by the factor as well, in addition to its
    /// center being moved.
    pub fn scale(&mut self, origin: Point, factor: Coord) {
        match self {
            Shape::Ellipse { center, radii, .. } => {
                *radii = factor * *radii;
                *center = center.scale(origin, factor);
            }
            Shape::Polygon { points, .. } | Shape::Polyline { points, .. } => {
                for point in points.iter_mut() {
                    *point = point.scale(origin, factor);
                }
            }
            Shape::Group { children, .. } => {
                for child in children {
                    child.scale(origin, factor);
                }
            }
        }
    }

    /// Rotate shape around the `origin`
    ///
    /// Ellipses stay axis aligned, only their center is rotated.
    pub fn rotate(&mut self, origin: Point, degrees: Coord) {
        self.map_points(&|point| point.rotate(origin, degrees));
    }

    /// Deep copy of the shape, children of a group are copied as well
    pub fn duplicate(&self) -> Shape {
        self.clone()
    }

    /// Bounding box of the shape geometry, `None` for empty shapes
    pub fn bbox(&self) -> Option<BBox> {
        match self {
            Shape::Ellipse { center, radii, .. } => {
                let Point([rx, ry]) = *radii;
                let radii = Point::new(rx.saturating_abs(), ry.saturating_abs());
                Some(BBox::new(*center - radii, *center + radii))
            }
            Shape::Polygon { points, .. } | Shape::Polyline { points, .. } => {
                BBox::from_points(points.iter().copied())
            }
            Shape::Group { children, .. } => {
                children.iter().fold(None, |bbox, child| match bbox {
                    Some(bbox) => Some(bbox.union_opt(child.bbox())),
                    None => child.bbox(),
                })
            }
        }
    }

    /// Replace every position point of the shape
    ///
    /// Ellipse radii are not positions, so they are left untouched.
    fn map_points(&mut self, f: &dyn Fn(Point) -> Point) {
        match self {
            Shape::Ellipse { center, .. } => *center = f(*center),
            Shape::Polygon { points, .. } | Shape::Polyline { points, .. } => {
                for point in points.iter_mut() {
                    *point = f(*point);
                }
            }
            Shape::Group { children, .. } => {
                for child in children {
                    child.map_points(f);
                }
            }
        }
    }
}
