//! Error adapter for converting CompassError to miette diagnostics.
//!
//! This module provides the bridge between the library's error types and
//! miette's diagnostic formatting used in the CLI. Every error is rendered
//! with a stable code and, where one applies, a hint on how to fix the input.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use compass::{CompassError, LayoutError};

/// Adapter that renders a [`CompassError`] through miette.
pub struct ErrorAdapter<'a>(pub &'a CompassError);

impl ErrorAdapter<'_> {
    fn help_text(&self) -> Option<&'static str> {
        match self.0 {
            CompassError::Layout(err) => Some(match err {
                LayoutError::InvalidTree { .. } => {
                    "exactly one node must have no parent; connect the others under it"
                }
                LayoutError::NotConnected { .. } => return None,
                LayoutError::UnknownDirection { .. } => {
                    "connection labels must be one of n, s, e, w, ne, nw, se, sw"
                }
                LayoutError::UnsupportedDirection { .. } => {
                    "set `layout.profile = \"compass\"` to allow diagonal directions"
                }
                LayoutError::UnknownNode { .. } => {
                    "node ids are positions in the `nodes` list, starting at 0"
                }
                LayoutError::MultipleParents { .. } | LayoutError::Cycle { .. } => {
                    "each node may appear in only one other node's connections"
                }
            }),
            CompassError::Collisions { .. } => {
                Some("rerun without --deny-collisions to see the overlapping pairs")
            }
            CompassError::Io(_) | CompassError::Input(_) | CompassError::Config(_) => None,
        }
    }
}

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.0 {
            CompassError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.0 {
            CompassError::Io(_) => "compass::io",
            CompassError::Input(_) => "compass::input",
            CompassError::Config(_) => "compass::config",
            CompassError::Layout(_) => "compass::layout",
            CompassError::Collisions { .. } => "compass::collisions",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.help_text()
            .map(|help| Box::new(help) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// Wrap a [`CompassError`] for rendering.
pub fn to_reportable(err: &CompassError) -> ErrorAdapter<'_> {
    ErrorAdapter(err)
}
