//! JSON settings: per-category syntax color overrides layered on the default theme.

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::syntax::Category;

pub type Result<T> = std::result::Result<T, SettingsError>;

#[derive(Debug)]
pub enum SettingsError {
    Io(PathBuf, io::Error),
    Json(PathBuf, serde_json::Error),
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::Io(p, e) => write!(f, "cannot read {}: {}", p.display(), e),
            SettingsError::Json(p, e) => write!(f, "invalid settings in {}: {}", p.display(), e),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(_, e) => Some(e),
            SettingsError::Json(_, e) => Some(e),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub syntax: SyntaxSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleSetting {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg: Option<String>,
    /// Unregisters the category: its spans are no longer rendered.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub disabled: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SyntaxSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<StyleSetting>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<StyleSetting>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub string: Option<StyleSetting>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rune: Option<StyleSetting>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<StyleSetting>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constant: Option<StyleSetting>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub import_path: Option<StyleSetting>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub declaration: Option<StyleSetting>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<StyleSetting>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator: Option<StyleSetting>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub builtin: Option<StyleSetting>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unresolved: Option<StyleSetting>,
}

impl SyntaxSettings {
    pub fn get(&self, category: Category) -> Option<&StyleSetting> {
        match category {
            Category::Keyword => self.keyword.as_ref(),
            Category::Comment => self.comment.as_ref(),
            Category::String => self.string.as_ref(),
            Category::Rune => self.rune.as_ref(),
            Category::Number => self.number.as_ref(),
            Category::Constant => self.constant.as_ref(),
            Category::ImportPath => self.import_path.as_ref(),
            Category::Declaration => self.declaration.as_ref(),
            Category::Label => self.label.as_ref(),
            Category::Operator => self.operator.as_ref(),
            Category::Builtin => self.builtin.as_ref(),
            Category::Unresolved => self.unresolved.as_ref(),
        }
    }
}

pub fn parse_settings(path: &Path, data: &str) -> Result<Settings> {
    serde_json::from_str(data).map_err(|e| SettingsError::Json(path.to_path_buf(), e))
}

pub fn load_settings(path: &Path) -> Result<Settings> {
    let data =
        std::fs::read_to_string(path).map_err(|e| SettingsError::Io(path.to_path_buf(), e))?;
    parse_settings(path, &data)
}

#[cfg(test)]
#[path = "../tests/unit/settings.rs"]
mod tests;
