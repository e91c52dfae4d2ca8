use crate::config::{default_color, ChartJob};
use crate::core::{Segment, SegmentSpec};
use crate::utils::error::{ChartError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional overrides layered onto [`ChartJob::default`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    pub sampling: Option<SamplingConfig>,
    pub segments: Option<Vec<SegmentConfig>>,
    pub chart: Option<ChartConfig>,
    pub export: Option<ExportConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SamplingConfig {
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SegmentConfig {
    pub name: Segment,
    pub mean: f64,
    pub std_dev: f64,
    pub count: usize,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChartConfig {
    pub title: Option<String>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub display_order: Option<Vec<Segment>>,
    pub figure_width: Option<f64>,
    pub figure_height: Option<f64>,
    pub dpi: Option<u32>,
    pub box_width: Option<f64>,
    pub title_font_pt: Option<f64>,
    pub label_font_pt: Option<f64>,
    pub tight: Option<bool>,
    pub despine: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExportConfig {
    pub chart_file: Option<String>,
    pub table_csv: Option<String>,
    pub summary_json: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ChartError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ChartError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${OUTPUT_NAME})；未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ChartError::ConfigError {
            message: format!("Invalid placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Applies the overrides on top of the built-in job.
    pub fn into_job(self) -> ChartJob {
        let mut job = ChartJob::default();

        if let Some(seed) = self.sampling.and_then(|s| s.seed) {
            job.seed = seed;
        }

        if let Some(segments) = self.segments {
            job.segments = segments
                .into_iter()
                .map(|s| SegmentSpec {
                    segment: s.name,
                    mean: s.mean,
                    std_dev: s.std_dev,
                    count: s.count,
                    color: s.color.unwrap_or_else(|| default_color(s.name).to_string()),
                })
                .collect();
        }

        if let Some(chart) = self.chart {
            let spec = &mut job.chart;
            if let Some(v) = chart.title {
                spec.title = v;
            }
            if let Some(v) = chart.x_label {
                spec.x_label = v;
            }
            if let Some(v) = chart.y_label {
                spec.y_label = v;
            }
            if let Some(v) = chart.display_order {
                spec.display_order = v;
            }
            if let Some(v) = chart.figure_width {
                spec.figure_size.0 = v;
            }
            if let Some(v) = chart.figure_height {
                spec.figure_size.1 = v;
            }
            if let Some(v) = chart.dpi {
                spec.dpi = v;
            }
            if let Some(v) = chart.box_width {
                spec.box_width = v;
            }
            if let Some(v) = chart.title_font_pt {
                spec.title_font_pt = v;
            }
            if let Some(v) = chart.label_font_pt {
                spec.label_font_pt = v;
            }
            if let Some(v) = chart.tight {
                spec.tight = v;
            }
            if let Some(v) = chart.despine {
                spec.despine = v;
            }
        }

        if let Some(export) = self.export {
            if let Some(v) = export.chart_file {
                job.export.chart_file = v;
            }
            job.export.table_csv = export.table_csv.or(job.export.table_csv);
            job.export.summary_json = export.summary_json.or(job.export.summary_json);
        }

        job
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_default_job() {
        let job = TomlConfig::from_toml_str("").unwrap().into_job();
        assert_eq!(job, ChartJob::default());
    }

    #[test]
    fn test_unknown_segment_name_is_rejected() {
        let content = r#"
[[segments]]
name = "Mid-Value"
mean = 1.0
std_dev = 1.0
count = 1
"#;
        let err = TomlConfig::from_toml_str(content).unwrap_err();
        assert!(matches!(err, ChartError::ConfigError { .. }));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = TomlConfig::from_toml_str("[chart]\ncolour = \"red\"\n").unwrap_err();
        assert!(err.to_string().contains("TOML parsing error"));
    }

    #[test]
    fn test_unset_placeholder_is_left_alone() {
        let content = "[export]\nchart_file = \"${SEGMENT_BOXPLOT_SURELY_UNSET_VAR}.png\"\n";
        let job = TomlConfig::from_toml_str(content).unwrap().into_job();
        assert_eq!(job.export.chart_file, "${SEGMENT_BOXPLOT_SURELY_UNSET_VAR}.png");
    }
}
