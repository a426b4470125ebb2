//! CLI logic for the Stagehand layout tool.
//!
//! Reads a JSON diagram description, lays it out and writes the result back
//! as JSON.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::info;

use stagehand::{
    DiagramBuilder, StagehandError,
    options::{LayoutMode, LayoutOptions},
};

/// Run the Stagehand CLI application
///
/// This function processes the input file through the layout pipeline and
/// writes the laid-out diagram to the output file.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `StagehandError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed diagram descriptions
pub fn run(args: &Args) -> Result<(), StagehandError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing diagram"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;

    let builder = DiagramBuilder::new(app_config);
    let mut diagram = builder.parse(&source)?;
    if args.auto {
        diagram
            .layout
            .get_or_insert_with(LayoutOptions::default)
            .mode = Some(LayoutMode::Auto);
    }

    let outcome = builder.layout(&diagram);
    let json = builder.to_json(&outcome.diagram, args.resolve)?;

    fs::write(&args.output, json)?;

    info!(
        output_file = args.output,
        stage_width = outcome.stage().width(),
        stage_height = outcome.stage().height(),
        score = outcome.score.total;
        "Layout exported successfully"
    );

    Ok(())
}
