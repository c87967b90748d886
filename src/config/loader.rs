//! Loader for traversal tuning files (RON or JSON).

use ron::Options;
use std::fs;
use std::path::Path;

use super::TraversalTuning;

/// Error type for tuning loading failures.
#[derive(Debug)]
pub struct TuningLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for TuningLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

impl std::error::Error for TuningLoadError {}

/// RON options with implicit `Some` so optional fields can be written bare.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

/// Parse tuning from RON text. Missing fields take their defaults.
pub fn parse_ron(contents: &str) -> Result<TraversalTuning, TuningLoadError> {
    ron_options()
        .from_str(contents)
        .map_err(|e| TuningLoadError {
            file: "<ron>".to_string(),
            message: format!("Parse error: {}", e),
        })
}

/// Parse tuning from JSON text. Missing fields take their defaults.
pub fn parse_json(contents: &str) -> Result<TraversalTuning, TuningLoadError> {
    serde_json::from_str(contents).map_err(|e| TuningLoadError {
        file: "<json>".to_string(),
        message: format!("Parse error: {}", e),
    })
}

/// Load tuning from disk. `.json` files go through serde_json, anything else is read as RON.
pub fn load_tuning(path: &Path) -> Result<TraversalTuning, TuningLoadError> {
    let file_name = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|e| TuningLoadError {
        file: file_name.clone(),
        message: format!("IO error: {}", e),
    })?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let parsed = if is_json {
        parse_json(&contents)
    } else {
        parse_ron(&contents)
    };

    parsed.map_err(|e| TuningLoadError {
        file: file_name,
        message: e.message,
    })
}
