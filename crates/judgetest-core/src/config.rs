//! Configuration loading.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::bank::CsvBankSource;
use crate::model::Category;

/// Paper size for generated documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaperSize {
    #[default]
    A4,
    Letter,
}

/// Where each category's question table lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankPaths {
    #[serde(default = "default_kumite_path")]
    pub kumite: PathBuf,
    #[serde(default = "default_kata_path")]
    pub kata: PathBuf,
}

impl BankPaths {
    pub fn path_for(&self, category: Category) -> &Path {
        match category {
            Category::Kumite => &self.kumite,
            Category::Kata => &self.kata,
        }
    }

    /// Move both tables into `dir`, keeping their file names.
    pub fn relocate(&mut self, dir: &Path) {
        self.kumite = dir.join(self.kumite.file_name().unwrap_or(OsStr::new(KUMITE_FILE)));
        self.kata = dir.join(self.kata.file_name().unwrap_or(OsStr::new(KATA_FILE)));
    }
}

impl Default for BankPaths {
    fn default() -> Self {
        Self {
            kumite: default_kumite_path(),
            kata: default_kata_path(),
        }
    }
}

const KUMITE_FILE: &str = "kumite_questions.csv";
const KATA_FILE: &str = "kata_questions.csv";

fn default_kumite_path() -> PathBuf {
    PathBuf::from("data").join(KUMITE_FILE)
}
fn default_kata_path() -> PathBuf {
    PathBuf::from("data").join(KATA_FILE)
}

/// Top-level judgetest configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JudgetestConfig {
    /// Question bank locations.
    #[serde(default)]
    pub banks: BankPaths,
    /// Upper bound on questions per test.
    #[serde(default = "default_max_questions")]
    pub max_questions: usize,
    /// Question count used when none is requested.
    #[serde(default = "default_questions")]
    pub default_questions: usize,
    /// Directory generated documents are written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Paper size of generated documents.
    #[serde(default)]
    pub page_size: PaperSize,
    /// Heading printed under the title on the first page. Empty disables it.
    #[serde(default = "default_subheading")]
    pub subheading: String,
}

fn default_max_questions() -> usize {
    50
}
fn default_questions() -> usize {
    10
}
fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}
fn default_subheading() -> String {
    "True/False Questions".to_string()
}

impl Default for JudgetestConfig {
    fn default() -> Self {
        Self {
            banks: BankPaths::default(),
            max_questions: default_max_questions(),
            default_questions: default_questions(),
            output_dir: default_output_dir(),
            page_size: PaperSize::default(),
            subheading: default_subheading(),
        }
    }
}

impl JudgetestConfig {
    /// The CSV source described by `banks`.
    pub fn bank_source(&self) -> CsvBankSource {
        CsvBankSource::new(&self.banks.kumite, &self.banks.kata)
    }

    /// The first-page heading, if enabled.
    pub fn subheading(&self) -> Option<&str> {
        let s = self.subheading.trim();
        (!s.is_empty()).then_some(s)
    }

    /// Check the numeric bounds for consistency.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(self.max_questions >= 1, "max_questions must be at least 1");
        anyhow::ensure!(
            (1..=self.max_questions).contains(&self.default_questions),
            "default_questions must be between 1 and max_questions ({})",
            self.max_questions
        );
        Ok(())
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are inserted as-is and never rescanned.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + end];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `judgetest.toml` in the current directory
/// 2. `~/.config/judgetest/config.toml`
///
/// Environment variable override: `JUDGETEST_DATA_DIR` replaces the
/// directory of both bank tables; their file names are kept.
pub fn load_config() -> Result<JudgetestConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<JudgetestConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("judgetest.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = toml::from_str::<JudgetestConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            config
        }
        None => JudgetestConfig::default(),
    };

    // Apply env var overrides
    if let Ok(dir) = std::env::var("JUDGETEST_DATA_DIR") {
        config.banks.relocate(Path::new(&dir));
    }

    config.banks.kumite = resolve_path(&config.banks.kumite);
    config.banks.kata = resolve_path(&config.banks.kata);
    config.output_dir = resolve_path(&config.output_dir);

    config.validate()?;
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("judgetest"))
}
