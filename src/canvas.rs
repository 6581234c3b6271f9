//! Drawing surface used by shapes
//!
//! Shapes only talk to the [`Canvas`] trait. [`Raster`] is the pixel buffer
//! implementation used for conversion, it does integer scan conversion without
//! anti-aliasing and can be saved as PNG.
use crate::{
    BBox, Color, ConvertError, Coord, Image, ImageMut, ImageOwned, Layout, Point,
    geometry::saturate,
};
use std::{
    fs::File,
    io::{BufWriter, Write},
    ops::RangeInclusive,
    path::Path,
};

/// Drawing primitives required to render shapes
pub trait Canvas {
    /// Fill axis aligned ellipse, radii sign is ignored
    fn draw_ellipse(&mut self, center: Point, radii: Point, color: Color);

    /// Fill polygon (even-odd rule), edges are always included
    fn draw_polygon(&mut self, points: &[Point], color: Color);

    /// Draw one pixel wide line, both ends are included
    fn draw_line(&mut self, p0: Point, p1: Point, color: Color);
}

/// RGB raster image
#[derive(Debug, Clone)]
pub struct Raster {
    image: ImageOwned<Color>,
}

impl Raster {
    /// Create raster of the given size filled with `background`
    pub fn new(width: usize, height: usize, background: Color) -> Self {
        Self {
            image: ImageOwned::new_with(height, width, |_, _| background),
        }
    }

    /// Color of the pixel, `None` if it is outside of the raster
    pub fn pixel(&self, point: Point) -> Option<Color> {
        let (row, col) = Self::index(point.x() as i64, point.y() as i64)?;
        self.get(row, col).copied()
    }

    /// Set pixel color, pixels outside of the raster are ignored
    pub fn put_pixel(&mut self, point: Point, color: Color) {
        self.put(point.x() as i64, point.y() as i64, color)
    }

    /// Reset every pixel to `color`
    pub fn clear(&mut self, color: Color) {
        self.image.fill(color)
    }

    /// Bounding box of the raster, `None` if it is empty
    pub fn bbox(&self) -> Option<BBox> {
        if self.width() == 0 || self.height() == 0 {
            return None;
        }
        let right = Coord::try_from(self.width() - 1).unwrap_or(Coord::MAX);
        let bottom = Coord::try_from(self.height() - 1).unwrap_or(Coord::MAX);
        Some(BBox::new((0, 0), (right, bottom)))
    }

    /// Row and column of the pixel, `None` for negative coordinates
    fn index(x: i64, y: i64) -> Option<(usize, usize)> {
        Some((usize::try_from(y).ok()?, usize::try_from(x).ok()?))
    }

    fn put(&mut self, x: i64, y: i64, color: Color) {
        let Some((row, col)) = Self::index(x, y) else {
            return;
        };
        if let Some(pixel) = self.get_mut(row, col) {
            *pixel = color;
        }
    }

    /// Fill columns `[x0, x1]` of the row `y`, clipped to the raster
    fn fill_span(&mut self, y: i64, x0: i64, x1: i64, color: Color) {
        let Some(view) = self.bbox() else {
            return;
        };
        if y < view.min().y() as i64 || y > view.max().y() as i64 {
            return;
        }
        let x0 = x0.max(view.min().x() as i64);
        let x1 = x1.min(view.max().x() as i64);
        for x in x0..=x1 {
            self.put(x, y, color);
        }
    }

    /// Rows of `bbox` visible on the raster
    fn visible_rows(&self, bbox: BBox) -> Option<RangeInclusive<i64>> {
        let visible = self.bbox()?.intersect(bbox)?;
        Some(visible.min().y() as i64..=visible.max().y() as i64)
    }

    /// Encode raster as 8-bit RGB PNG
    pub fn write_png(&self, writer: impl Write) -> Result<(), png::EncodingError> {
        let mut encoder = png::Encoder::new(writer, self.width() as u32, self.height() as u32);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(bytemuck::cast_slice(self.data()))?;
        writer.finish()
    }

    /// Save raster as PNG file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConvertError> {
        let file = File::create(path).map_err(ConvertError::Io)?;
        self.write_png(BufWriter::new(file))?;
        Ok(())
    }
}

impl Image for Raster {
    type Pixel = Color;

    fn layout(&self) -> Layout {
        self.image.layout()
    }

    fn data(&self) -> &[Self::Pixel] {
        self.image.data()
    }
}

impl ImageMut for Raster {
    fn data_mut(&mut self) -> &mut [Self::Pixel] {
        self.image.data_mut()
    }
}

/// Divide rounding to the nearest integer, ties away from zero, `den > 0`
fn div_round(num: i128, den: i128) -> i128 {
    if num >= 0 {
        (2 * num + den) / (2 * den)
    } else {
        -((-2 * num + den) / (2 * den))
    }
}

impl Canvas for Raster {
    fn draw_ellipse(&mut self, center: Point, radii: Point, color: Color) {
        let (cx, cy) = (center.x() as i64, center.y() as i64);
        let rx = radii.x().unsigned_abs() as i64;
        let ry = radii.y().unsigned_abs() as i64;
        let bbox = BBox::new(
            (saturate(cx - rx), saturate(cy - ry)),
            (saturate(cx + rx), saturate(cy + ry)),
        );
        let (rx2, ry2) = ((rx as i128).pow(2), (ry as i128).pow(2));
        for y in self.visible_rows(bbox).into_iter().flatten() {
            let dy = (y - cy) as i128;
            if dy.abs() > ry as i128 {
                continue;
            }
            // widest dx such that dx^2 * ry^2 + dy^2 * rx^2 <= rx^2 * ry^2
            let limit = rx2 * ry2 - dy * dy * rx2;
            let ratio = if ry == 0 { 0.0 } else { dy as f64 / ry as f64 };
            let estimate = (rx as f64 * (1.0 - ratio * ratio).max(0.0).sqrt()) as i128;
            let mut dx = estimate.min(rx as i128);
            while dx < rx as i128 && (dx + 1) * (dx + 1) * ry2 <= limit {
                dx += 1;
            }
            while dx > 0 && dx * dx * ry2 > limit {
                dx -= 1;
            }
            let dx = dx as i64;
            self.fill_span(y, cx - dx, cx + dx, color);
        }
    }

    fn draw_polygon(&mut self, points: &[Point], color: Color) {
        let Some(bbox) = BBox::from_points(points.iter().copied()) else {
            return;
        };
        let mut crossings = Vec::new();
        for y in self.visible_rows(bbox).into_iter().flatten() {
            // sample at pixel centers
            let yc = y as f64 + 0.5;
            crossings.clear();
            let edges = points.iter().zip(points.iter().cycle().skip(1));
            for (p0, p1) in edges {
                let (y0, y1) = (p0.y() as f64, p1.y() as f64);
                if (y0 <= yc && yc < y1) || (y1 <= yc && yc < y0) {
                    let (x0, x1) = (p0.x() as f64, p1.x() as f64);
                    crossings.push(x0 + (yc - y0) / (y1 - y0) * (x1 - x0));
                }
            }
            crossings.sort_by(|a, b| a.total_cmp(b));
            for span in crossings.chunks_exact(2) {
                let x0 = (span[0] - 0.5).ceil() as i64;
                let x1 = (span[1] - 0.5).ceil() as i64 - 1;
                if x0 <= x1 {
                    self.fill_span(y, x0, x1, color);
                }
            }
        }
        // outline makes edges inclusive, so rect covers all its corner pixels
        match points {
            [point] => self.put_pixel(*point, color),
            _ => {
                for (p0, p1) in points.iter().zip(points.iter().cycle().skip(1)) {
                    self.draw_line(*p0, *p1, color);
                }
            }
        }
    }

    fn draw_line(&mut self, p0: Point, p1: Point, color: Color) {
        let (x0, y0) = (p0.x() as i64, p0.y() as i64);
        let (dx, dy) = (p1.x() as i64 - x0, p1.y() as i64 - y0);
        let steps = dx.abs().max(dy.abs());
        if steps == 0 {
            self.put_pixel(p0, color);
            return;
        }
        // one pixel per step along the major axis, only across visible
        // columns (or rows), minor axis is rounded to the nearest pixel
        let (start, length, delta) = if dx.abs() >= dy.abs() {
            (x0, self.width() as i64, dx)
        } else {
            (y0, self.height() as i64, dy)
        };
        let (first, last) = if delta > 0 {
            (-start, length - 1 - start)
        } else {
            (start - (length - 1), start)
        };
        for step in first.max(0)..=last.min(steps) {
            let x = x0 + div_round(step as i128 * dx as i128, steps as i128) as i64;
            let y = y0 + div_round(step as i128 * dy as i128, steps as i128) as i64;
            self.put(x, y, color);
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Single drawing call captured by [`Recorder`]
    #[derive(Debug, Clone, PartialEq)]
    pub enum DrawOp {
        Ellipse {
            center: Point,
            radii: Point,
            color: Color,
        },
        Polygon {
            points: Vec<Point>,
            color: Color,
        },
        Line {
            p0: Point,
            p1: Point,
            color: Color,
        },
    }

    /// Canvas which records drawing calls instead of rendering them
    #[derive(Debug, Default)]
    pub struct Recorder {
        pub ops: Vec<DrawOp>,
    }

    impl Canvas for Recorder {
        fn draw_ellipse(&mut self, center: Point, radii: Point, color: Color) {
            self.ops.push(DrawOp::Ellipse {
                center,
                radii,
                color,
            });
        }

        fn draw_polygon(&mut self, points: &[Point], color: Color) {
            self.ops.push(DrawOp::Polygon {
                points: points.to_vec(),
                color,
            });
        }

        fn draw_line(&mut self, p0: Point, p1: Point, color: Color) {
            self.ops.push(DrawOp::Line { p0, p1, color });
        }
    }
}
