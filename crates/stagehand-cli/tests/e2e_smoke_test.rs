use std::{
    fs,
    path::{Path, PathBuf},
};

use serde_json::Value;
use tempfile::tempdir;

use stagehand_cli::Args;

fn demos_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos")
}

/// Collects all .json files from a directory
fn collect_json_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("json")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

fn args_for(input: &Path, output: &Path) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        output: output.to_string_lossy().to_string(),
        config: None,
        log_level: "off".to_string(),
        resolve: true,
        auto: false,
    }
}

#[test]
fn e2e_smoke_test_valid_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let demos = collect_json_files(demos_dir());
    assert!(!demos.is_empty(), "No demos found in demos/");

    let mut failed_demos = Vec::new();

    for demo_path in &demos {
        let output_path = temp_dir
            .path()
            .join(demo_path.file_name().expect("demo has a file name"));

        if let Err(e) = stagehand_cli::run(&args_for(demo_path, &output_path)) {
            failed_demos.push((demo_path.clone(), e.to_string()));
            continue;
        }

        let output = fs::read_to_string(&output_path).expect("Output written");
        let value: Value = serde_json::from_str(&output).expect("Output is JSON");
        if value["stageWidth"].as_f64().is_none() || value["layoutScore"].is_null() {
            failed_demos.push((demo_path.clone(), "missing stage or score".to_string()));
        }
        let connections = value["connections"].as_array().map_or(0, Vec::len);
        let resolved = value["resolvedConnections"].as_array().map_or(0, Vec::len);
        if connections != resolved {
            failed_demos.push((demo_path.clone(), "unresolved connections".to_string()));
        }
    }

    if !failed_demos.is_empty() {
        eprintln!("\nDemos that failed:");
        for (path, err) in &failed_demos {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} demo(s) failed unexpectedly", failed_demos.len());
    }
}

#[test]
fn e2e_smoke_test_error_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let error_demos = collect_json_files(demos_dir().join("errors"));
    assert!(!error_demos.is_empty(), "No error demos found in demos/errors/");

    let unexpectedly_succeeded: Vec<_> = error_demos
        .iter()
        .filter(|demo_path| {
            let output_path = temp_dir.path().join("error_out.json");
            stagehand_cli::run(&args_for(demo_path, &output_path)).is_ok()
        })
        .collect();

    if !unexpectedly_succeeded.is_empty() {
        eprintln!("\nError demos that unexpectedly succeeded:");
        for path in &unexpectedly_succeeded {
            eprintln!("  - {}", path.display());
        }
        panic!(
            "{} error demo(s) succeeded unexpectedly",
            unexpectedly_succeeded.len()
        );
    }
}

#[test]
fn e2e_auto_flag_overrides_manual_mode() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = demos_dir().join("manual.json");
    let output = temp_dir.path().join("manual_auto.json");

    let mut args = args_for(&input, &output);
    args.auto = true;
    stagehand_cli::run(&args).expect("Layout succeeds");

    let value: Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).expect("Output is JSON");
    let authored = serde_json::json!({ "x": 60.0, "y": 60.0 });
    assert_ne!(value["components"][0]["position"], authored);
    assert!(value["zones"][0]["width"].as_f64().is_some());
}
