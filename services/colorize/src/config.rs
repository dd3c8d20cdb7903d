//! Job configuration: a YAML file merged with command-line/env overrides.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

/// Settings that may come from a YAML job file.
///
/// ```yaml
/// input: staged/grid.json
/// palette: palettes/purple-yellow.json
/// output: web-tiles/13/2611/629.png
/// min_val: 0
/// max_val: 1
/// nodata_val: 0
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct JobFile {
    pub input: Option<PathBuf>,
    pub palette: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub min_val: Option<f64>,
    pub max_val: Option<f64>,
    pub nodata_val: Option<f64>,
}

impl JobFile {
    /// Parse a job from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Invalid job configuration")
    }

    /// Load a job from a YAML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml(&content)
    }

    /// Overlay values that were given explicitly; `overrides` wins.
    pub fn merge(self, overrides: JobFile) -> JobFile {
        JobFile {
            input: overrides.input.or(self.input),
            palette: overrides.palette.or(self.palette),
            output: overrides.output.or(self.output),
            min_val: overrides.min_val.or(self.min_val),
            max_val: overrides.max_val.or(self.max_val),
            nodata_val: overrides.nodata_val.or(self.nodata_val),
        }
    }
}

/// A fully resolved colorize job.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorizeJob {
    pub input: PathBuf,
    pub palette: PathBuf,
    pub output: PathBuf,
    pub min_val: Option<f64>,
    pub max_val: Option<f64>,
    pub nodata_val: f64,
}

impl TryFrom<JobFile> for ColorizeJob {
    type Error = anyhow::Error;

    fn try_from(file: JobFile) -> Result<Self> {
        let Some(input) = file.input else {
            bail!("No input grid given (use --input, COLORIZE_INPUT or `input:` in the config)");
        };
        let Some(palette) = file.palette else {
            bail!("No palette given (use --palette, COLORIZE_PALETTE or `palette:` in the config)");
        };
        let Some(output) = file.output else {
            bail!("No output path given (use --output, COLORIZE_OUTPUT or `output:` in the config)");
        };

        Ok(ColorizeJob {
            input,
            palette,
            output,
            min_val: file.min_val,
            max_val: file.max_val,
            nodata_val: file.nodata_val.unwrap_or(0.0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_job() {
        let yaml = r#"
input: staged/grid.json
palette: palettes/purple-yellow.json
output: web-tiles/0/0/0.png
min_val: 0
max_val: 1.5
nodata_val: -9999
"#;
        let job = JobFile::from_yaml(yaml).unwrap();
        assert_eq!(job.input, Some(PathBuf::from("staged/grid.json")));
        assert_eq!(job.max_val, Some(1.5));
        assert_eq!(job.nodata_val, Some(-9999.0));
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(JobFile::from_yaml("colours: [red, blue]").is_err());
    }

    #[test]
    fn test_overrides_win() {
        let file = JobFile {
            input: Some("a.json".into()),
            min_val: Some(0.0),
            max_val: Some(10.0),
            ..Default::default()
        };
        let overrides = JobFile {
            input: Some("b.json".into()),
            max_val: Some(20.0),
            ..Default::default()
        };

        let merged = file.merge(overrides);
        assert_eq!(merged.input, Some(PathBuf::from("b.json")));
        assert_eq!(merged.min_val, Some(0.0));
        assert_eq!(merged.max_val, Some(20.0));
    }

    #[test]
    fn test_resolve_defaults_nodata_to_zero() {
        let file = JobFile {
            input: Some("grid.json".into()),
            palette: Some("palette.json".into()),
            output: Some("out.png".into()),
            ..Default::default()
        };
        let job = ColorizeJob::try_from(file).unwrap();
        assert_eq!(job.nodata_val, 0.0);
        assert_eq!(job.min_val, None);
    }

    #[test]
    fn test_resolve_requires_paths() {
        let file = JobFile {
            input: Some("grid.json".into()),
            ..Default::default()
        };
        let err = ColorizeJob::try_from(file).unwrap_err();
        assert!(err.to_string().contains("No palette given"));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("job.yaml");
        std::fs::write(&path, "output: out.png\nnodata_val: 999\n").unwrap();

        let job = JobFile::from_file(&path).unwrap();
        assert_eq!(job.output, Some(PathBuf::from("out.png")));
        assert_eq!(job.nodata_val, Some(999.0));
    }
}
