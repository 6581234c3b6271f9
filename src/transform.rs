//! Transform attribute parser
//!
//! Element may carry a single `translate(x, y)`, `scale(v)` or `rotate(v)`
//! directive together with an optional `transform-origin="x y"`.
use crate::{
    Coord, Point, Shape,
    utils::{parse_coord, tokens},
};
use std::{fmt, str::FromStr};

/// Single geometric transformation of a shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    /// Move by vector, origin is irrelevant
    Translate(Point),
    /// Scale by integer factor relative to the origin
    Scale(Coord),
    /// Rotate by degrees around the origin
    Rotate(Coord),
}

impl Transform {
    /// Apply transformation to the shape in place
    pub fn apply(&self, shape: &mut Shape, origin: Point) {
        match *self {
            Transform::Translate(delta) => shape.translate(delta),
            Transform::Scale(factor) => shape.scale(origin, factor),
            Transform::Rotate(degrees) => shape.rotate(origin, degrees),
        }
    }

    /// Parse `transform-origin` value, missing coordinates default to zero
    pub fn parse_origin(text: &str) -> Result<Point, TransformError> {
        let mut tokens = tokens(text);
        let mut coord = || match tokens.next() {
            None => Ok(0),
            Some(token) => number(token),
        };
        Ok(Point::new(coord()?, coord()?))
    }
}

fn number(token: &str) -> Result<Coord, TransformError> {
    parse_coord(token).ok_or_else(|| TransformError::InvalidNumber(token.to_owned()))
}

impl FromStr for Transform {
    type Err = TransformError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut tokens = tokens(text);
        let op = tokens.next().unwrap_or_default();
        let mut arg = |name: &'static str| match tokens.next() {
            None => Err(TransformError::MissingArgument { op: name }),
            Some(token) => number(token),
        };
        match op {
            "translate" => {
                let x = arg("translate")?;
                // `translate(x)` means no vertical movement
                let y = match arg("translate") {
                    Err(TransformError::MissingArgument { .. }) => 0,
                    y => y?,
                };
                Ok(Transform::Translate(Point::new(x, y)))
            }
            "scale" => Ok(Transform::Scale(arg("scale")?)),
            "rotate" => Ok(Transform::Rotate(arg("rotate")?)),
            _ => Err(TransformError::Unrecognized(op.to_owned())),
        }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transform::Translate(Point([x, y])) => write!(f, "translate({}, {})", x, y),
            Transform::Scale(factor) => write!(f, "scale({})", factor),
            Transform::Rotate(degrees) => write!(f, "rotate({})", degrees),
        }
    }
}

/// Error while parsing transform attributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransformError {
    /// Transform name is not one of translate, scale or rotate
    Unrecognized(String),
    /// Transform argument is not an integer
    InvalidNumber(String),
    /// Transform requires more arguments
    MissingArgument { op: &'static str },
}

impl fmt::Display for TransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformError::Unrecognized(op) => write!(f, "unrecognized transform type: {}", op),
            TransformError::InvalidNumber(value) => {
                write!(f, "transform argument is not an integer: {}", value)
            }
            TransformError::MissingArgument { op } => {
                write!(f, "transform {} is missing an argument", op)
            }
        }
    }
}

impl std::error::Error for TransformError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;

    #[test]
    fn test_parse_transform() -> Result<(), TransformError> {
        assert_eq!(
            "translate(3,4)".parse::<Transform>()?,
            Transform::Translate(Point::new(3, 4))
        );
        assert_eq!(
            " translate( -3 , 4 ) ".parse::<Transform>()?,
            Transform::Translate(Point::new(-3, 4))
        );
        assert_eq!(
            "translate(5)".parse::<Transform>()?,
            Transform::Translate(Point::new(5, 0))
        );
        assert_eq!("scale(2)".parse::<Transform>()?, Transform::Scale(2));
        assert_eq!("scale(-1)".parse::<Transform>()?, Transform::Scale(-1));
        assert_eq!("rotate(90)".parse::<Transform>()?, Transform::Rotate(90));
        Ok(())
    }

    #[test]
    fn test_parse_transform_errors() {
        assert_eq!(
            "skewX(30)".parse::<Transform>(),
            Err(TransformError::Unrecognized("skewX".to_owned()))
        );
        assert_eq!(
            "".parse::<Transform>(),
            Err(TransformError::Unrecognized(String::new()))
        );
        assert_eq!(
            "scale(1.5)".parse::<Transform>(),
            Err(TransformError::InvalidNumber("1.5".to_owned()))
        );
        assert_eq!(
            "rotate()".parse::<Transform>(),
            Err(TransformError::MissingArgument { op: "rotate" })
        );
        assert_eq!(
            "translate(1, y)".parse::<Transform>(),
            Err(TransformError::InvalidNumber("y".to_owned()))
        );
    }

    #[test]
    fn test_display_parse() -> Result<(), TransformError> {
        for text in ["translate(1, -2)", "scale(3)", "rotate(270)"] {
            assert_eq!(text.parse::<Transform>()?.to_string(), text);
        }
        Ok(())
    }

    #[test]
    fn test_parse_origin() -> Result<(), TransformError> {
        assert_eq!(Transform::parse_origin("10 20")?, Point::new(10, 20));
        assert_eq!(Transform::parse_origin("10,20")?, Point::new(10, 20));
        assert_eq!(Transform::parse_origin("7")?, Point::new(7, 0));
        assert_eq!(Transform::parse_origin("")?, Point::new(0, 0));
        assert!(Transform::parse_origin("left top").is_err());
        Ok(())
    }

    #[test]
    fn test_apply() {
        let origin = Point::new(5, 5);
        let mut shape = Shape::rect(Color::RED, Point::new(5, 5), 3, 3);

        Transform::Translate(Point::new(3, 4)).apply(&mut shape, origin);
        assert_eq!(shape, Shape::rect(Color::RED, Point::new(8, 9), 3, 3));

        let mut shape = Shape::circle(Color::RED, Point::new(6, 5), 2);
        Transform::Scale(3).apply(&mut shape, origin);
        assert_eq!(shape, Shape::circle(Color::RED, Point::new(8, 5), 6));

        Transform::Rotate(180).apply(&mut shape, origin);
        assert_eq!(shape, Shape::circle(Color::RED, Point::new(2, 5), 6));
    }
}
