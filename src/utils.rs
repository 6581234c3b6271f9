//! Utility functions used across the library
use crate::{Coord, Point};

/// Parse integer coordinate, whole input must be consumed
pub fn parse_coord(text: &str) -> Option<Coord> {
    lexical_core::parse::<Coord>(text.trim().as_bytes()).ok()
}

/// Parse list of points in `x0,y0 x1,y1 ...` form
///
/// Pairs are separated by any amount of whitespace, coordinates inside of
/// a pair by a single comma.
pub fn parse_points(text: &str) -> Option<Vec<Point>> {
    text.split_whitespace()
        .map(|pair| {
            let (x, y) = pair.split_once(',')?;
            Some(Point::new(parse_coord(x)?, parse_coord(y)?))
        })
        .collect()
}

/// Split text into tokens treating `(`, `)` and `,` as whitespace
pub fn tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| c.is_whitespace() || matches!(c, '(' | ')' | ','))
        .filter(|token| !token.is_empty())
}
