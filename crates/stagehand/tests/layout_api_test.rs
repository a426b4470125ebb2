//! Integration tests for laying out diagrams through the DiagramBuilder API

use std::f32::consts::PI;

use float_cmp::approx_eq;

use stagehand::{
    DiagramBuilder,
    config::AppConfig,
    geometry::Point,
    identifier::Id,
    model::{Diagram, LayoutScore},
    options::Profile,
};

fn layout(source: &str) -> (Diagram, stagehand::LayoutOutcome) {
    let builder = DiagramBuilder::default();
    let diagram = builder.parse(source).expect("Failed to parse diagram");
    let outcome = builder.layout(&diagram);
    (diagram, outcome)
}

fn center_of(diagram: &Diagram, id: &str) -> Point {
    diagram
        .component(Id::new(id))
        .unwrap_or_else(|| panic!("component {id} missing"))
        .center()
}

fn assert_contained(diagram: &Diagram) {
    let width = diagram.stage_width.expect("stage width set");
    let height = diagram.stage_height.expect("stage height set");
    for component in &diagram.components {
        let bounds = component.bounds();
        assert!(
            bounds.min_x() >= -1e-3
                && bounds.min_y() >= -1e-3
                && bounds.max_x() <= width + 1e-3
                && bounds.max_y() <= height + 1e-3,
            "component {} at {bounds:?} leaves the {width}x{height} stage",
            component.id
        );
    }
}

#[test]
fn test_pipeline_spacing_scenario() {
    let source = r#"{
        "layout": { "mode": "auto", "profile": "pipeline", "direction": "left-to-right",
                    "spacing": { "columnGap": 80 } },
        "components": [
            { "id": "A", "shape": "box" },
            { "id": "B", "shape": "box" },
            { "id": "C", "shape": "box" }
        ],
        "connections": [{ "from": "A", "to": "B" }, { "from": "B", "to": "C" }]
    }"#;

    let (_, outcome) = layout(source);
    let a = center_of(&outcome.diagram, "A");
    let b = center_of(&outcome.diagram, "B");
    let c = center_of(&outcome.diagram, "C");

    assert!(approx_eq!(f32, a.x(), 200.0, epsilon = 1e-3));
    assert!(approx_eq!(f32, b.x(), 480.0, epsilon = 1e-3));
    assert!(approx_eq!(f32, c.x(), 760.0, epsilon = 1e-3));
    assert_eq!(a.y(), b.y());
    assert_eq!(b.y(), c.y());
    assert_eq!(outcome.profile, Some(Profile::Pipeline));
    assert_eq!(outcome.score, LayoutScore::new(0, 0));
}

#[test]
fn test_pipeline_path_is_monotonic() {
    let source = r#"{
        "layout": { "mode": "auto", "profile": "pipeline" },
        "components": [
            { "id": "ingest", "shape": "cylinder" },
            { "id": "parse", "shape": "box" },
            { "id": "enrich", "shape": "hexagon" },
            { "id": "store", "shape": "database" }
        ],
        "connections": [
            { "from": "ingest", "to": "parse" },
            { "from": "parse", "to": "enrich" },
            { "from": "enrich", "to": "store" }
        ]
    }"#;

    let (_, outcome) = layout(source);
    let xs: Vec<f32> = ["ingest", "parse", "enrich", "store"]
        .iter()
        .map(|id| center_of(&outcome.diagram, id).x())
        .collect();
    assert!(xs.windows(2).all(|pair| pair[0] < pair[1]), "xs = {xs:?}");
    assert_contained(&outcome.diagram);
}

#[test]
fn test_hub_spokes_are_equidistant() {
    let source = r#"{
        "layout": { "mode": "auto", "profile": "hub", "hints": { "primaryPath": ["core"] } },
        "components": [
            { "id": "core", "shape": "circle" },
            { "id": "s1", "shape": "box" },
            { "id": "s2", "shape": "box" },
            { "id": "s3", "shape": "server" },
            { "id": "s4", "shape": "box" },
            { "id": "s5", "shape": "database" }
        ],
        "connections": [
            { "from": "core", "to": "s1" },
            { "from": "core", "to": "s2" },
            { "from": "core", "to": "s3" },
            { "from": "core", "to": "s4" },
            { "from": "core", "to": "s5" }
        ]
    }"#;

    let (_, outcome) = layout(source);
    let hub = center_of(&outcome.diagram, "core");
    let spokes: Vec<Point> = ["s1", "s2", "s3", "s4", "s5"]
        .iter()
        .map(|id| center_of(&outcome.diagram, id))
        .collect();

    let distances: Vec<f32> = spokes
        .iter()
        .map(|spoke| spoke.sub_point(hub).hypot())
        .collect();
    for distance in &distances {
        assert!(
            approx_eq!(f32, *distance, distances[0], epsilon = 1e-2),
            "distances = {distances:?}"
        );
    }

    let step = 2.0 * PI / spokes.len() as f32;
    let angles: Vec<f32> = spokes
        .iter()
        .map(|spoke| {
            let delta = spoke.sub_point(hub);
            delta.y().atan2(delta.x())
        })
        .collect();
    for pair in angles.windows(2) {
        let separation = (pair[1] - pair[0]).rem_euclid(2.0 * PI);
        assert!(
            approx_eq!(f32, separation, step, epsilon = 1e-3),
            "angles = {angles:?}"
        );
    }
    assert_contained(&outcome.diagram);
}

#[test]
fn test_connection_resolution_scenario() {
    let source = r#"{
        "components": [
            { "id": "a", "shape": "box", "position": { "x": 40, "y": 70 } },
            { "id": "b", "shape": "box", "position": { "x": 240, "y": 70 } }
        ],
        "connections": [{ "from": "a", "to": "b" }]
    }"#;

    let builder = DiagramBuilder::default();
    let diagram = builder.parse(source).unwrap();
    let resolved = builder.resolve_connections(&diagram);

    assert_eq!(resolved[0].from, Point::new(160.0, 100.0));
    assert_eq!(resolved[0].to, Point::new(240.0, 100.0));
}

#[test]
fn test_disjoint_manual_layout_scores_zero() {
    let source = r#"{
        "components": [
            { "id": "a", "shape": "box", "position": { "x": 0, "y": 0 } },
            { "id": "b", "shape": "box", "position": { "x": 300, "y": 0 } },
            { "id": "c", "shape": "circle", "position": { "x": 60, "y": 300 } },
            { "id": "d", "shape": "circle", "position": { "x": 360, "y": 300 } }
        ],
        "connections": [{ "from": "a", "to": "b" }, { "from": "c", "to": "d" }]
    }"#;

    let (diagram, outcome) = layout(source);
    assert_eq!(outcome.score, LayoutScore::new(0, 0));
    assert_eq!(outcome.diagram.layout_score, Some(LayoutScore::new(0, 0)));
    assert_eq!(outcome.diagram.components, diagram.components);
    assert!(outcome.passes.is_empty());
}

#[test]
fn test_zoned_layouts_stay_on_stage() {
    let source = r#"{
        "zones": [{ "id": "edge" }, { "id": "core" }, { "id": "data" }],
        "components": [
            { "id": "cdn", "shape": "cloud", "zone": "edge" },
            { "id": "lb", "shape": "box", "zone": "edge" },
            { "id": "api", "shape": "server", "zone": "core" },
            { "id": "worker", "shape": "gear", "zone": "core" },
            { "id": "db", "shape": "database", "zone": "data" },
            { "id": "cache", "shape": "cylinder", "zone": "data" }
        ],
        "connections": [
            { "from": "cdn", "to": "lb" },
            { "from": "lb", "to": "api" },
            { "from": "api", "to": "worker" },
            { "from": "api", "to": "db" },
            { "from": "worker", "to": "cache" }
        ]
    }"#;

    let builder = DiagramBuilder::default();
    let mut diagram = builder.parse(source).unwrap();

    for profile in ["pipeline", "tiered", "hub", "fanout", "swimlane", "grid"] {
        diagram.layout = Some(stagehand::options::LayoutOptions {
            mode: Some(stagehand::options::LayoutMode::Auto),
            profile: Some(profile.to_string()),
            ..Default::default()
        });
        let outcome = builder.layout(&diagram);

        assert_contained(&outcome.diagram);
        for zone in &outcome.diagram.zones {
            let frame = zone.bounds().expect("zone framed");
            for component in outcome
                .diagram
                .components
                .iter()
                .filter(|component| component.zone == Some(zone.id))
            {
                assert!(
                    frame.contains(&component.bounds(), 1e-3),
                    "{profile}: {} outside zone {}",
                    component.id,
                    zone.id
                );
            }
        }
    }
}

#[test]
fn test_inferred_swimlane_for_fully_zoned_diagram() {
    let source = r#"{
        "layout": { "mode": "auto" },
        "zones": [{ "id": "client" }, { "id": "server" }],
        "components": [
            { "id": "ui", "shape": "person", "zone": "client" },
            { "id": "api", "shape": "server", "zone": "server" }
        ],
        "connections": [{ "from": "ui", "to": "api" }]
    }"#;

    let (_, outcome) = layout(source);
    assert_eq!(outcome.profile, Some(Profile::Swimlane));
}

#[test]
fn test_layout_is_deterministic() {
    let source = r#"{
        "layout": { "mode": "auto" },
        "components": [
            { "id": "gw", "shape": "box" },
            { "id": "a", "shape": "circle" },
            { "id": "b", "shape": "diamond" },
            { "id": "c", "shape": "hexagon" },
            { "id": "d", "shape": "box" }
        ],
        "connections": [
            { "from": "gw", "to": "a" },
            { "from": "gw", "to": "b" },
            { "from": "gw", "to": "c" },
            { "from": "c", "to": "d" }
        ]
    }"#;

    let (_, first) = layout(source);
    let (_, second) = layout(source);
    assert_eq!(first.diagram, second.diagram);
    assert_eq!(first.passes, second.passes);

    let builder = DiagramBuilder::default();
    assert_eq!(
        builder.to_json(&first.diagram, true).unwrap(),
        builder.to_json(&second.diagram, true).unwrap()
    );
}

#[test]
fn test_repair_passes_grow_gaps() {
    let source = r#"{
        "layout": {
            "mode": "auto",
            "profile": "pipeline",
            "hints": { "primaryPath": ["a", "b"] },
            "repair": { "maxPasses": 3, "growthFactor": 1.5, "maxCrossings": 0 }
        },
        "components": [
            { "id": "a", "shape": "box" },
            { "id": "b", "shape": "box" },
            { "id": "x", "shape": "box" },
            { "id": "y", "shape": "box" },
            { "id": "z", "shape": "box" }
        ],
        "connections": [
            { "from": "a", "to": "b" },
            { "from": "a", "to": "x" },
            { "from": "b", "to": "y" },
            { "from": "b", "to": "z" },
            { "from": "x", "to": "z" },
            { "from": "a", "to": "y" }
        ]
    }"#;

    let (_, outcome) = layout(source);
    assert!(!outcome.passes.is_empty());
    assert!(outcome.passes.len() <= 4);
    for (index, report) in outcome.passes.iter().enumerate() {
        assert_eq!(report.pass, index);
    }
    for pair in outcome.passes.windows(2) {
        assert!(pair[1].gaps.column > pair[0].gaps.column);
        assert!(pair[1].gaps.row > pair[0].gaps.row);
        assert!(pair[1].gaps.component > pair[0].gaps.component);
    }

    let best = outcome
        .passes
        .iter()
        .map(|report| report.score.total)
        .min()
        .unwrap();
    assert_eq!(outcome.score.total, best);
}

#[test]
fn test_template_sets_profile_and_direction() {
    let source = r#"{
        "layout": { "mode": "auto", "template": "architecture" },
        "components": [
            { "id": "web", "shape": "box", "role": "frontend" },
            { "id": "svc", "shape": "server", "role": "backend" },
            { "id": "db", "shape": "database", "role": "database" }
        ],
        "connections": [{ "from": "web", "to": "svc" }, { "from": "svc", "to": "db" }]
    }"#;

    let (_, outcome) = layout(source);
    assert_eq!(outcome.profile, Some(Profile::Tiered));

    let ys: Vec<f32> = ["web", "svc", "db"]
        .iter()
        .map(|id| center_of(&outcome.diagram, id).y())
        .collect();
    assert!(ys.windows(2).all(|pair| pair[0] < pair[1]), "ys = {ys:?}");
}

#[test]
fn test_toml_configuration_drives_layout() {
    let config: AppConfig = toml::from_str(
        r#"
        [layout]
        mode = "auto"
        profile = "pipeline"

        [layout.spacing]
        column_gap = 100.0
        "#,
    )
    .expect("Failed to parse config");

    let source = r#"{
        "components": [
            { "id": "A", "shape": "box" },
            { "id": "B", "shape": "box" }
        ],
        "connections": [{ "from": "A", "to": "B" }]
    }"#;

    let builder = DiagramBuilder::new(config);
    let diagram = builder.parse(source).unwrap();
    let outcome = builder.layout(&diagram);

    assert_eq!(outcome.profile, Some(Profile::Pipeline));
    assert!(approx_eq!(f32, center_of(&outcome.diagram, "A").x(), 220.0, epsilon = 1e-3));
    assert!(approx_eq!(f32, center_of(&outcome.diagram, "B").x(), 540.0, epsilon = 1e-3));
}

#[test]
fn test_empty_diagram_is_unchanged() {
    let (diagram, outcome) = layout(r#"{ "layout": { "mode": "auto" } }"#);
    assert_eq!(outcome.diagram, diagram);
    assert_eq!(outcome.profile, None);
}
