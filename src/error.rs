use crate::{ColorError, TransformError};
use std::fmt;

/// Error that aborts conversion of a document
///
/// Unrecognized elements and unrecognized transform types are not errors,
/// they are reported with `tracing::warn!` and skipped.
#[derive(Debug)]
pub enum ConvertError {
    /// Source document can not be read
    DocumentIo(std::io::Error),
    /// Source document is not well formed XML
    DocumentXml(roxmltree::Error),
    /// Required attribute is absent
    MissingAttribute {
        element: String,
        attr: &'static str,
    },
    /// Attribute value can not be parsed
    InvalidAttribute {
        element: String,
        attr: &'static str,
        value: String,
    },
    /// Color attribute is neither `#RRGGBB` nor a known color name
    UnknownColor {
        element: String,
        error: ColorError,
    },
    /// `use` references an id which was not registered before it
    UnresolvedReference(String),
    /// Transform attribute has malformed arguments
    Transform {
        element: String,
        error: TransformError,
    },
    /// Output image can not be created
    Io(std::io::Error),
    /// Failed to encode or write output image
    Png(png::EncodingError),
}

impl ConvertError {
    /// Whether the source document could not be loaded at all
    pub fn is_document_load(&self) -> bool {
        matches!(self, Self::DocumentIo(_) | Self::DocumentXml(_))
    }
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ConvertError::*;
        match self {
            DocumentIo(error) => write!(f, "failed to read document: {}", error),
            DocumentXml(error) => write!(f, "failed to parse document: {}", error),
            MissingAttribute { element, attr } => {
                write!(f, "<{}> is missing required attribute `{}`", element, attr)
            }
            InvalidAttribute {
                element,
                attr,
                value,
            } => write!(
                f,
                "<{}> has invalid value of attribute `{}`: {:?}",
                element, attr, value
            ),
            UnknownColor { element, error } => write!(f, "<{}>: {}", element, error),
            UnresolvedReference(id) => write!(f, "unresolved reference to id `{}`", id),
            Transform { element, error } => write!(f, "<{}>: {}", element, error),
            Io(error) => write!(f, "failed to create image: {}", error),
            Png(error) => write!(f, "failed to write image: {}", error),
        }
    }
}

impl std::error::Error for ConvertError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        use ConvertError::*;
        match self {
            DocumentIo(error) => Some(error),
            DocumentXml(error) => Some(error),
            UnknownColor { error, .. } => Some(error),
            Transform { error, .. } => Some(error),
            Io(error) => Some(error),
            Png(error) => Some(error),
            _ => None,
        }
    }
}

impl From<roxmltree::Error> for ConvertError {
    fn from(error: roxmltree::Error) -> Self {
        Self::DocumentXml(error)
    }
}

impl From<png::EncodingError> for ConvertError {
    fn from(error: png::EncodingError) -> Self {
        Self::Png(error)
    }
}
