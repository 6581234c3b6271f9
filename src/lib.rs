//! Converter from a small subset of SVG to PNG images.
//!
//! Supported elements:
//!  - `ellipse`, `circle`, `polygon`, `rect`, `polyline`, `line`
//!  - `g` groups and `use` references to previously defined ids
//!  - single `translate`, `scale` or `rotate` transform per element
//!
//! All geometry is integer, shapes are drawn without anti-aliasing.
#![deny(warnings)]

mod canvas;
mod color;
mod convert;
mod document;
mod error;
mod geometry;
mod image;
mod shape;
mod transform;
mod utils;

pub use canvas::{Canvas, Raster};
pub use color::{Color, ColorError};
pub use convert::{ConvertOptions, convert, convert_with};
pub use document::{Document, Registry};
pub use error::ConvertError;
pub use geometry::{BBox, Coord, Point};
pub use image::{Image, ImageMut, ImageOwned, Layout};
pub use shape::Shape;
pub use transform::{Transform, TransformError};
pub use utils::{parse_coord, parse_points};
