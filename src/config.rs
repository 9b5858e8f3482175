//! TOML 配置：内置默认值 + 文件覆盖 + 校验。
//!
//! 语义上非法的数值（非正长度、阈值不在 (0, 1] 内等）只产生警告，
//! 并回退到该字段的默认值；文件无法解析则是致命错误。

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::extend::{ExtendOpt, OverlapBounds};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("cannot serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("{field} is invalid: {reason}; using default {default}")]
    Invalid {
        field: &'static str,
        reason: String,
        default: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub paths: PathsConfig,
    pub searcher: SearcherConfig,
    pub extension: ExtensionConfig,
    pub supercontigs: SupercontigsConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub reads_path: PathBuf,
    pub supercontigs_path: PathBuf,
    pub supercontigs_output_path: PathBuf,
    /// 预先构建的语料索引（`index` 子命令的输出）
    pub index_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchBackend {
    /// linear scan over every read
    Scan,
    /// FM index over the corpus, built in memory or loaded from `index_path`
    Index,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearcherConfig {
    pub backend: SearchBackend,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtensionConfig {
    pub max_contig_length: i64,
    pub max_suffix_length: i64,
    pub min_suffix_length: i64,
    pub suffix_length_step: i64,
    pub successor_length: i64,
    pub definitive_successor_threshold: f64,
    pub definitive_successor_total_min: i64,
    pub branching_successor_threshold: f64,
    pub branching_successor_max_count: i64,
    pub branching_successor_total_min: i64,
    pub max_contig_amount: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupercontigsConfig {
    pub linebreak_at: i64,
    pub overlapping_min: i64,
    pub overlapping_max: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            paths: PathsConfig::default(),
            searcher: SearcherConfig::default(),
            extension: ExtensionConfig::default(),
            supercontigs: SupercontigsConfig::default(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            reads_path: PathBuf::from("database.fa"),
            supercontigs_path: PathBuf::from("supercontigs.txt"),
            supercontigs_output_path: PathBuf::from("supercontigs_output.txt"),
            index_path: None,
        }
    }
}

impl Default for SearcherConfig {
    fn default() -> Self {
        Self { backend: SearchBackend::Scan }
    }
}

impl Default for ExtensionConfig {
    fn default() -> Self {
        Self {
            max_contig_length: 80_000,
            max_suffix_length: 50,
            min_suffix_length: 30,
            suffix_length_step: 5,
            successor_length: 8,
            definitive_successor_threshold: 0.95,
            definitive_successor_total_min: 40,
            branching_successor_threshold: 0.30,
            branching_successor_max_count: 3,
            branching_successor_total_min: 30,
            max_contig_amount: 5,
        }
    }
}

impl Default for SupercontigsConfig {
    fn default() -> Self {
        Self { linebreak_at: 80, overlapping_min: 50, overlapping_max: 70 }
    }
}

fn invalid(field: &'static str, reason: impl Into<String>, default: impl ToString) -> ConfigError {
    ConfigError::Invalid { field, reason: reason.into(), default: default.to_string() }
}

fn require_positive(value: &mut i64, default: i64, field: &'static str, issues: &mut Vec<ConfigError>) {
    if *value <= 0 {
        issues.push(invalid(field, format!("{} is not positive", value), default));
        *value = default;
    }
}

fn require_non_negative(value: &mut i64, default: i64, field: &'static str, issues: &mut Vec<ConfigError>) {
    if *value < 0 {
        issues.push(invalid(field, format!("{} is negative", value), default));
        *value = default;
    }
}

fn require_fraction(value: &mut f64, default: f64, field: &'static str, issues: &mut Vec<ConfigError>) {
    if !(*value > 0.0 && *value <= 1.0) {
        issues.push(invalid(field, format!("{} is outside (0, 1]", value), default));
        *value = default;
    }
}

impl Config {
    /// 读取配置文件；文件不存在时使用默认值。
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(text) => toml::from_str(&text)
                .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("no config file at '{}', using built-in defaults", path.display());
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Read { path: path.to_path_buf(), source }),
        }
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// 校验并修正非法字段，返回每个被替换字段的说明。
    pub fn sanitize(&mut self) -> Vec<ConfigError> {
        let mut issues = Vec::new();
        let d = ExtensionConfig::default();
        let e = &mut self.extension;

        require_positive(&mut e.max_contig_length, d.max_contig_length, "extension.max_contig_length", &mut issues);
        require_positive(&mut e.max_suffix_length, d.max_suffix_length, "extension.max_suffix_length", &mut issues);
        require_positive(&mut e.min_suffix_length, d.min_suffix_length, "extension.min_suffix_length", &mut issues);
        require_positive(&mut e.suffix_length_step, d.suffix_length_step, "extension.suffix_length_step", &mut issues);
        require_positive(&mut e.successor_length, d.successor_length, "extension.successor_length", &mut issues);
        require_fraction(
            &mut e.definitive_successor_threshold,
            d.definitive_successor_threshold,
            "extension.definitive_successor_threshold",
            &mut issues,
        );
        require_non_negative(
            &mut e.definitive_successor_total_min,
            d.definitive_successor_total_min,
            "extension.definitive_successor_total_min",
            &mut issues,
        );
        require_fraction(
            &mut e.branching_successor_threshold,
            d.branching_successor_threshold,
            "extension.branching_successor_threshold",
            &mut issues,
        );
        require_positive(
            &mut e.branching_successor_max_count,
            d.branching_successor_max_count,
            "extension.branching_successor_max_count",
            &mut issues,
        );
        require_non_negative(
            &mut e.branching_successor_total_min,
            d.branching_successor_total_min,
            "extension.branching_successor_total_min",
            &mut issues,
        );
        require_positive(&mut e.max_contig_amount, d.max_contig_amount, "extension.max_contig_amount", &mut issues);
        if e.min_suffix_length > e.max_suffix_length {
            issues.push(invalid(
                "extension.min_suffix_length",
                format!("{} exceeds max_suffix_length {}", e.min_suffix_length, e.max_suffix_length),
                format!("{}..={}", d.min_suffix_length, d.max_suffix_length),
            ));
            e.min_suffix_length = d.min_suffix_length;
            e.max_suffix_length = d.max_suffix_length;
        }

        let d = SupercontigsConfig::default();
        let s = &mut self.supercontigs;
        require_positive(&mut s.linebreak_at, d.linebreak_at, "supercontigs.linebreak_at", &mut issues);
        require_non_negative(&mut s.overlapping_min, d.overlapping_min, "supercontigs.overlapping_min", &mut issues);
        require_non_negative(&mut s.overlapping_max, d.overlapping_max, "supercontigs.overlapping_max", &mut issues);
        if s.overlapping_min > s.overlapping_max {
            issues.push(invalid(
                "supercontigs.overlapping_min",
                format!("{} exceeds overlapping_max {}", s.overlapping_min, s.overlapping_max),
                format!("{}..={}", d.overlapping_min, d.overlapping_max),
            ));
            s.overlapping_min = d.overlapping_min;
            s.overlapping_max = d.overlapping_max;
        }
        issues
    }

    pub fn linebreak_at(&self) -> usize {
        self.supercontigs.linebreak_at.max(1) as usize
    }

    /// 引擎参数；应在 [`Config::sanitize`] 之后调用。
    pub fn extend_opt(&self) -> ExtendOpt {
        let e = &self.extension;
        let n = |v: i64| v.max(0) as usize;
        ExtendOpt {
            max_contig_length: n(e.max_contig_length),
            max_suffix_length: n(e.max_suffix_length),
            min_suffix_length: n(e.min_suffix_length),
            suffix_length_step: n(e.suffix_length_step),
            successor_length: n(e.successor_length),
            definitive_successor_threshold: e.definitive_successor_threshold,
            definitive_successor_total_min: n(e.definitive_successor_total_min),
            branching_successor_threshold: e.branching_successor_threshold,
            branching_successor_max_count: n(e.branching_successor_max_count),
            branching_successor_total_min: n(e.branching_successor_total_min),
            max_contig_amount: n(e.max_contig_amount),
            overlap: OverlapBounds {
                min: n(self.supercontigs.overlapping_min),
                max: n(self.supercontigs.overlapping_max),
            },
        }
    }
}
