//! Document builder
//!
//! Walks the element tree in document order, turns every supported element
//! into a [`Shape`], applies its transform and resolves `use` references
//! through a registry of previously built shapes.
use crate::{
    Canvas, Color, ConvertError, Coord, Point, Raster, Shape, Transform, TransformError,
    utils::{parse_coord, parse_points},
};
use roxmltree::Node;
use std::{
    collections::{HashMap, HashSet},
    path::Path,
};

const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

/// Converted document: canvas size and top level shapes in drawing order
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Document {
    width: usize,
    height: usize,
    shapes: Vec<Shape>,
}

impl Document {
    pub fn new(width: usize, height: usize, shapes: Vec<Shape>) -> Self {
        Self {
            width,
            height,
            shapes,
        }
    }

    /// Parse document from text
    pub fn parse(text: &str) -> Result<Self, ConvertError> {
        let xml = tracing::debug_span!("[xml]").in_scope(|| roxmltree::Document::parse(text))?;
        Self::from_root(xml.root_element())
    }

    /// Read and parse document from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConvertError> {
        let text = std::fs::read_to_string(path).map_err(ConvertError::DocumentIo)?;
        Self::parse(&text)
    }

    /// Build document from the root element
    ///
    /// Root element provides canvas size with `width` and `height` attributes,
    /// its children are converted to shapes.
    pub fn from_root(root: Node<'_, '_>) -> Result<Self, ConvertError> {
        let width = size_attr(root, "width")?;
        let height = size_attr(root, "height")?;
        let mut builder = Builder::default();
        let shapes = tracing::debug_span!("[build]").in_scope(|| builder.build_children(root))?;
        tracing::debug!(
            "[build:registry] {} ids registered",
            builder.registry.len()
        );
        Ok(Self::new(width, height, shapes))
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Top level shapes in drawing order
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Draw all shapes onto the canvas
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        for shape in self.shapes.iter() {
            shape.draw(canvas);
        }
    }

    /// Render document onto a new raster of the document size
    pub fn render(&self, background: Color) -> Raster {
        let mut raster = Raster::new(self.width, self.height, background);
        self.draw(&mut raster);
        raster
    }

    /// Serialize document as pretty printed JSON
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Shapes registered by id, used to resolve `use` references
///
/// An entry tracks the shape it was registered from: it holds the shape after
/// its own transform, and the builder replays transforms of enclosing groups
/// on it with [`Registry::transform`]. Registering an existing id replaces
/// the previous entry.
#[derive(Debug, Default, Clone)]
pub struct Registry {
    shapes: HashMap<String, Shape>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record copy of the shape under `id`
    pub fn register(&mut self, id: &str, shape: &Shape) {
        if self.shapes.insert(id.to_owned(), shape.duplicate()).is_some() {
            tracing::debug!("[registry] id `{}` registered again, last one wins", id);
        }
    }

    /// Produce independent copy of the shape referenced by `href`
    ///
    /// Reference is an id prefixed by `#`.
    pub fn resolve(&self, href: &str) -> Result<Shape, ConvertError> {
        let id = href.strip_prefix('#').unwrap_or(href);
        self.shapes
            .get(id)
            .map(Shape::duplicate)
            .ok_or_else(|| ConvertError::UnresolvedReference(id.to_owned()))
    }

    /// Apply transformation to the entries registered under `ids`
    ///
    /// Every entry is transformed once, even if its id is listed repeatedly.
    pub fn transform<'a>(
        &mut self,
        ids: impl IntoIterator<Item = &'a str>,
        tr: &Transform,
        origin: Point,
    ) {
        let mut seen = HashSet::new();
        for id in ids {
            if !seen.insert(id) {
                continue;
            }
            if let Some(shape) = self.shapes.get_mut(id) {
                tr.apply(shape, origin);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

/// State of a single document conversion
#[derive(Debug, Default)]
struct Builder {
    registry: Registry,
    /// Ids in registration order, a group transform reaches the ids
    /// registered while its children were built
    registered: Vec<String>,
}

impl Builder {
    /// Build shapes for all child elements of the node, in document order
    fn build_children(&mut self, node: Node<'_, '_>) -> Result<Vec<Shape>, ConvertError> {
        let mut shapes = Vec::new();
        for child in node.children().filter(|child| child.is_element()) {
            if let Some(shape) = self.build_element(child)? {
                shapes.push(shape);
            }
        }
        Ok(shapes)
    }

    /// Build shape for an element, `None` if the element is not supported
    fn build_element(&mut self, node: Node<'_, '_>) -> Result<Option<Shape>, ConvertError> {
        let tag = node.tag_name().name();
        let mut scope = None;
        let mut shape = match tag {
            "ellipse" => Shape::ellipse(
                color_attr(node, "fill")?,
                Point::new(coord_attr(node, "cx")?, coord_attr(node, "cy")?),
                Point::new(coord_attr(node, "rx")?, coord_attr(node, "ry")?),
            ),
            "circle" => Shape::circle(
                color_attr(node, "fill")?,
                Point::new(coord_attr(node, "cx")?, coord_attr(node, "cy")?),
                coord_attr(node, "r")?,
            ),
            "polygon" => Shape::polygon(color_attr(node, "fill")?, points_attr(node, "points")?),
            "rect" => Shape::rect(
                color_attr(node, "fill")?,
                Point::new(coord_attr(node, "x")?, coord_attr(node, "y")?),
                coord_attr(node, "width")?,
                coord_attr(node, "height")?,
            ),
            "polyline" => {
                Shape::polyline(color_attr(node, "stroke")?, points_attr(node, "points")?)
            }
            "line" => Shape::line(
                color_attr(node, "stroke")?,
                Point::new(coord_attr(node, "x1")?, coord_attr(node, "y1")?),
                Point::new(coord_attr(node, "x2")?, coord_attr(node, "y2")?),
            ),
            "g" => {
                scope = Some(self.registered.len());
                Shape::group(self.build_children(node)?)
            }
            "use" => {
                let href = node
                    .attribute("href")
                    .or_else(|| node.attribute((XLINK_NS, "href")))
                    .ok_or_else(|| missing(node, "href"))?;
                self.registry.resolve(href)?
            }
            _ => {
                tracing::warn!("[build] unrecognized shape type: {}", tag);
                return Ok(None);
            }
        };
        if let Some((tr, origin)) = parse_transform(node)? {
            tr.apply(&mut shape, origin);
            if let Some(first) = scope {
                let ids = self.registered[first..].iter().map(String::as_str);
                self.registry.transform(ids, &tr, origin);
            }
        }
        if let Some(id) = node.attribute("id") {
            self.registry.register(id, &shape);
            self.registered.push(id.to_owned());
        }
        tracing::debug!(
            "[build:shape] <{}> {} id={:?}",
            tag,
            shape.kind(),
            node.attribute("id")
        );
        Ok(Some(shape))
    }
}

/// Parse `transform` and `transform-origin` attributes of the element
///
/// Unrecognized transform types are reported and yield no transformation.
fn parse_transform(node: Node<'_, '_>) -> Result<Option<(Transform, Point)>, ConvertError> {
    let Some(text) = node.attribute("transform") else {
        return Ok(None);
    };
    let element = || node.tag_name().name().to_owned();
    let tr = match text.parse::<Transform>() {
        Ok(tr) => tr,
        Err(TransformError::Unrecognized(op)) => {
            tracing::warn!("[transform] unrecognized transform type: {}", op);
            return Ok(None);
        }
        Err(error) => {
            return Err(ConvertError::Transform {
                element: element(),
                error,
            });
        }
    };
    let origin = match node.attribute("transform-origin") {
        None => Point::default(),
        Some(origin) => {
            Transform::parse_origin(origin).map_err(|error| ConvertError::Transform {
                element: element(),
                error,
            })?
        }
    };
    Ok(Some((tr, origin)))
}

fn missing(node: Node<'_, '_>, attr: &'static str) -> ConvertError {
    ConvertError::MissingAttribute {
        element: node.tag_name().name().to_owned(),
        attr,
    }
}

fn invalid(node: Node<'_, '_>, attr: &'static str, value: &str) -> ConvertError {
    ConvertError::InvalidAttribute {
        element: node.tag_name().name().to_owned(),
        attr,
        value: value.to_owned(),
    }
}

/// Integer attribute, absent attribute is zero
fn coord_attr(node: Node<'_, '_>, attr: &'static str) -> Result<Coord, ConvertError> {
    match node.attribute(attr) {
        None => Ok(0),
        Some(value) => parse_coord(value).ok_or_else(|| invalid(node, attr, value)),
    }
}

/// Required non-negative integer attribute
fn size_attr(node: Node<'_, '_>, attr: &'static str) -> Result<usize, ConvertError> {
    let value = node.attribute(attr).ok_or_else(|| missing(node, attr))?;
    parse_coord(value)
        .and_then(|size| usize::try_from(size).ok())
        .ok_or_else(|| invalid(node, attr, value))
}

fn color_attr(node: Node<'_, '_>, attr: &'static str) -> Result<Color, ConvertError> {
    let value = node.attribute(attr).ok_or_else(|| missing(node, attr))?;
    value.parse().map_err(|error| ConvertError::UnknownColor {
        element: node.tag_name().name().to_owned(),
        error,
    })
}

fn points_attr(node: Node<'_, '_>, attr: &'static str) -> Result<Vec<Point>, ConvertError> {
    let value = node.attribute(attr).ok_or_else(|| missing(node, attr))?;
    parse_points(value).ok_or_else(|| invalid(node, attr, value))
}
