//! Stagehand - deterministic auto-layout for architecture diagrams.
//!
//! Takes a diagram description (zones, components and connections) and
//! computes positions for every component, frames for the zones and the
//! stage size needed to show them, plus a quality score. Placement follows a
//! named profile (pipeline, tiered, hub, fanout, swimlane or grid), inferred
//! from the topology when none is given.

pub mod analyze;
pub mod config;
pub mod connection;
pub mod layout;
pub mod structure;

mod error;

pub use stagehand_core::{geometry, identifier, model, options, shape};

pub use error::StagehandError;
pub use layout::{LayoutOutcome, PassReport};

use log::{debug, info, trace};
use serde_json::Value;

use stagehand_core::{
    model::Diagram,
    options::{LayoutMode, LayoutOptions},
};

use config::AppConfig;
use connection::ResolvedConnection;

/// Builder for parsing, laying out and serializing diagrams.
///
/// # Examples
///
/// ```
/// use stagehand::{DiagramBuilder, config::AppConfig};
///
/// let source = r#"{
///     "layout": { "mode": "auto", "profile": "pipeline" },
///     "components": [
///         { "id": "web", "shape": "box" },
///         { "id": "api", "shape": "box" }
///     ],
///     "connections": [{ "from": "web", "to": "api" }]
/// }"#;
///
/// let builder = DiagramBuilder::new(AppConfig::default());
/// let diagram = builder.parse(source).expect("Failed to parse");
/// let outcome = builder.layout(&diagram);
///
/// assert!(outcome.diagram.stage_width.is_some());
/// assert_eq!(outcome.score.total, 0);
/// ```
#[derive(Debug, Default)]
pub struct DiagramBuilder {
    config: AppConfig,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse a JSON diagram description.
    ///
    /// # Errors
    ///
    /// Returns `StagehandError::Json` when the document is not a valid
    /// diagram description.
    pub fn parse(&self, source: &str) -> Result<Diagram, StagehandError> {
        info!("Parsing diagram");
        let diagram: Diagram = serde_json::from_str(source)
            .map_err(|err| StagehandError::new_json_error(err, source))?;

        debug!(
            zones = diagram.zones.len(),
            components = diagram.components.len(),
            connections = diagram.connections.len();
            "Diagram parsed successfully"
        );
        trace!(diagram:?; "Parsed diagram");
        Ok(diagram)
    }

    /// Lay out a diagram.
    ///
    /// The diagram's own `layout` options are applied over the configured
    /// defaults. In manual mode positions are kept as authored and only the
    /// stage size and score are filled in; in auto mode the layout engine
    /// places everything.
    pub fn layout(&self, diagram: &Diagram) -> LayoutOutcome {
        let default_options = LayoutOptions::default();
        let options = diagram.layout.as_ref().unwrap_or(&default_options);
        let config = self.config.layout().with_options(options);

        match config.mode {
            LayoutMode::Auto => layout::run(diagram, &config),
            LayoutMode::Manual => {
                info!("Manual layout mode, keeping authored positions");
                let mut diagram = diagram.clone();
                let stage = layout::measure_stage(&diagram, config.spacing.padding);
                let score = layout::score_diagram(&diagram);
                diagram.stage_width = Some(stage.width());
                diagram.stage_height = Some(stage.height());
                diagram.layout_score = Some(score);

                LayoutOutcome {
                    diagram,
                    profile: None,
                    score,
                    passes: Vec::new(),
                }
            }
        }
    }

    /// Resolve every connection of `diagram` into literal endpoint coordinates.
    pub fn resolve_connections(&self, diagram: &Diagram) -> Vec<ResolvedConnection> {
        connection::resolve_connections(diagram)
    }

    /// Serialize a diagram to pretty-printed JSON.
    ///
    /// With `with_resolved`, the output carries a `resolvedConnections` array
    /// with one entry per connection.
    ///
    /// # Errors
    ///
    /// Returns `StagehandError::Json` if serialization fails.
    pub fn to_json(&self, diagram: &Diagram, with_resolved: bool) -> Result<String, StagehandError> {
        let mut value = serde_json::to_value(diagram)?;
        if with_resolved {
            let resolved = serde_json::to_value(self.resolve_connections(diagram))?;
            if let Value::Object(map) = &mut value {
                map.insert("resolvedConnections".to_string(), resolved);
            }
        }
        Ok(serde_json::to_string_pretty(&value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = r#"{
        "components": [
            { "id": "a", "shape": "box", "position": { "x": 10, "y": 10 } },
            { "id": "b", "shape": "circle", "position": { "x": 400, "y": 40 } }
        ],
        "connections": [{ "from": "a", "to": "b" }]
    }"#;

    #[test]
    fn test_manual_mode_keeps_positions() {
        let builder = DiagramBuilder::default();
        let diagram = builder.parse(SOURCE).unwrap();
        let outcome = builder.layout(&diagram);

        assert_eq!(outcome.diagram.components, diagram.components);
        assert_eq!(outcome.profile, None);
        assert_eq!(outcome.diagram.stage_width, Some(500.0));
        assert_eq!(outcome.diagram.stage_height, Some(140.0));
    }

    #[test]
    fn test_auto_mode_from_options() {
        let builder = DiagramBuilder::default();
        let mut diagram = builder.parse(SOURCE).unwrap();
        diagram.layout = Some(LayoutOptions {
            mode: Some(LayoutMode::Auto),
            ..LayoutOptions::default()
        });

        let outcome = builder.layout(&diagram);
        assert!(outcome.profile.is_some());
        assert_ne!(outcome.diagram.components, diagram.components);
        assert!(!outcome.passes.is_empty());
    }

    #[test]
    fn test_parse_error_keeps_source() {
        let err = DiagramBuilder::default().parse("{ not json").unwrap_err();
        match err {
            StagehandError::Json { src, .. } => assert_eq!(src, "{ not json"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_json_output_with_resolved_connections() {
        let builder = DiagramBuilder::default();
        let diagram = builder.parse(SOURCE).unwrap();

        let json = builder.to_json(&diagram, true).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        let resolved = value["resolvedConnections"].as_array().unwrap();
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0]["fromSide"], "right");

        let plain = builder.to_json(&diagram, false).unwrap();
        assert!(!plain.contains("resolvedConnections"));
    }
}
