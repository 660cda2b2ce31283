//! Reading diagrams from and writing layouts to TOML files.

use std::{fs, io, path::Path};

use log::debug;

use compass::{CompassError, Layout, diagram::Diagram};

/// Reads a [`Diagram`] from a TOML file.
///
/// # Errors
///
/// Returns [`CompassError::Io`] if the file cannot be read and
/// [`CompassError::Input`] if it is not a valid diagram.
pub fn read_diagram(path: impl AsRef<Path>) -> Result<Diagram, CompassError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path)?;
    let diagram = parse_diagram(&source)
        .map_err(|err| CompassError::Input(format!("{}: {err}", path.display())))?;
    debug!(path = path.display().to_string(), nodes = diagram.len(); "Diagram loaded");
    Ok(diagram)
}

fn parse_diagram(source: &str) -> Result<Diagram, toml::de::Error> {
    toml::from_str(source)
}

/// Writes a [`Layout`] as TOML.
///
/// # Errors
///
/// Returns [`CompassError::Io`] if the layout cannot be serialized or the
/// file cannot be written.
pub fn write_layout(path: impl AsRef<Path>, layout: &Layout) -> Result<(), CompassError> {
    let output = render_layout(layout)?;
    fs::write(path, output)?;
    Ok(())
}

fn render_layout(layout: &Layout) -> Result<String, CompassError> {
    toml::to_string_pretty(layout).map_err(output_error)
}

fn output_error(err: toml::ser::Error) -> CompassError {
    CompassError::Io(io::Error::other(format!("failed to serialize layout: {err}")))
}
