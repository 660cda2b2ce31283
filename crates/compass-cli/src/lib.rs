//! CLI logic for the Compass layout tool.
//!
//! This module contains the core CLI logic: it reads a diagram, runs the
//! layout pipeline and writes the resulting positions and connectors.

pub mod error_adapter;

mod args;
mod config;
mod files;

pub use args::Args;

use log::{info, warn};

use compass::{CompassError, LayoutBuilder};

/// Run the Compass CLI application
///
/// This function processes the input file through the Compass pipeline
/// and writes the resulting layout to the output file.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `CompassError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed input diagrams
/// - Layout errors
/// - Collisions, when denied
pub fn run(args: &Args) -> Result<(), CompassError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing diagram"
    );

    let mut app_config = config::load_config(args.config.as_ref())?;
    if args.deny_collisions {
        app_config = app_config.with_deny_collisions(true);
    }

    let diagram = files::read_diagram(&args.input)?;

    let builder = LayoutBuilder::new(app_config);
    let layout = builder.layout(&diagram)?;

    for collision in layout.collisions() {
        warn!(first:% = collision.first, second:% = collision.second; "Layout contains overlapping nodes");
    }

    files::write_layout(&args.output, &layout)?;

    info!(
        output_file = args.output,
        nodes = layout.nodes().len(),
        connectors = layout.connectors().len();
        "Layout exported successfully"
    );

    Ok(())
}
