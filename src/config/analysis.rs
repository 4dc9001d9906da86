use crate::io::FovFilter;
use crate::pipeline::PipelineParams;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration of the `match-separation` tool.
///
/// At least one of `results_dir` and `inputs` must be given; explicit inputs
/// are loaded after the discovered ones.
#[derive(Debug, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub results_dir: Option<PathBuf>,
    #[serde(default)]
    pub inputs: Vec<PathBuf>,
    /// Fields of view to keep. Empty means: use the `<fov>.yaml` files of
    /// `results_dir`, or accept everything if there are none.
    #[serde(default)]
    pub fovs: Vec<u32>,
    /// Trial files whose name contains any of these are ignored.
    #[serde(default = "default_exclude_patterns")]
    pub exclude_patterns: Vec<String>,
    #[serde(default)]
    pub params: PipelineParams,
    #[serde(default)]
    pub output: OutputConfig,
}

fn default_exclude_patterns() -> Vec<String> {
    vec!["+LR".to_string()]
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Base directory for the relative paths below.
    pub dir: Option<PathBuf>,
    pub radial_csv: Option<PathBuf>,
    pub angle_csv: Option<PathBuf>,
    pub report_json: Option<PathBuf>,
}

impl OutputConfig {
    pub fn radial_csv_path(&self) -> Option<PathBuf> {
        self.radial_csv.as_deref().map(|p| self.resolve(p))
    }

    pub fn angle_csv_path(&self) -> Option<PathBuf> {
        self.angle_csv.as_deref().map(|p| self.resolve(p))
    }

    pub fn report_json_path(&self) -> Option<PathBuf> {
        self.report_json.as_deref().map(|p| self.resolve(p))
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        match &self.dir {
            Some(dir) if !path.is_absolute() => dir.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.results_dir.is_none() && self.inputs.is_empty() {
            return Err("config needs a results_dir or a non-empty inputs list".to_string());
        }
        self.params.validate()
    }

    /// FOV filter from the explicit list, falling back to `discovered`.
    pub fn fov_filter(&self, discovered: &[u32]) -> FovFilter {
        if !self.fovs.is_empty() {
            FovFilter::only(self.fovs.iter().copied())
        } else {
            FovFilter::only(discovered.iter().copied())
        }
    }
}

pub fn load_config(path: &Path) -> Result<AnalysisConfig, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    parse_config(&contents).map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

pub fn parse_config(contents: &str) -> Result<AnalysisConfig, String> {
    let config: AnalysisConfig = serde_json::from_str(contents).map_err(|e| e.to_string())?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_uses_defaults() {
        let config = parse_config(r#"{ "results_dir": "results" }"#).unwrap();
        assert_eq!(config.params, PipelineParams::default());
        assert_eq!(config.exclude_patterns, vec!["+LR".to_string()]);
        assert!(config.output.radial_csv_path().is_none());
    }

    #[test]
    fn relative_outputs_resolve_against_dir() {
        let config = parse_config(
            r#"{
                "inputs": ["a.60.matching.json"],
                "params": { "num_bins": 10, "seed": 7 },
                "output": { "dir": "out", "radial_csv": "r.csv", "angle_csv": "/abs/a.csv" }
            }"#,
        )
        .unwrap();
        assert_eq!(config.params.num_bins, 10);
        assert_eq!(config.params.num_samples, 1000);
        assert_eq!(config.params.seed, Some(7));
        assert_eq!(config.output.radial_csv_path(), Some(PathBuf::from("out/r.csv")));
        assert_eq!(config.output.angle_csv_path(), Some(PathBuf::from("/abs/a.csv")));
    }

    #[test]
    fn config_without_inputs_is_rejected() {
        assert!(parse_config("{}").is_err());
        assert!(parse_config(r#"{ "results_dir": "r", "params": { "num_bins": 0 } }"#).is_err());
    }

    #[test]
    fn explicit_fovs_override_discovered() {
        let config = parse_config(r#"{ "results_dir": "r", "fovs": [90] }"#).unwrap();
        let filter = config.fov_filter(&[60, 90]);
        assert!(filter.accepts(90));
        assert!(!filter.accepts(60));
        let config = parse_config(r#"{ "results_dir": "r" }"#).unwrap();
        assert!(config.fov_filter(&[]).is_any());
    }
}
