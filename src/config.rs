use anyhow::{bail, Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::document::{DEFAULT_INDENT, MAX_INDENT};

pub const DEFAULT_FILE: &str = "Skin_Global_Leaf_Optimized.json";
pub const CONFIG_ENV: &str = "SLIDE_THUMBS_CONFIG";
const CONFIG_FILE_NAME: &str = "slide-thumbs.toml";

/// Optional settings file (`slide-thumbs.toml`).
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub files: Option<Vec<PathBuf>>,
    #[serde(default)]
    pub indent: Option<usize>,
}

impl FileConfig {
    pub fn from_toml(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Load from an explicit path, then `$SLIDE_THUMBS_CONFIG`, then the user config dir.
    /// Only the last one may be absent.
    pub fn locate(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::read(path);
        }
        if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|v| !v.is_empty()) {
            return Self::read(Path::new(&path));
        }
        match default_config_path() {
            Some(path) if path.exists() => Self::read(&path),
            _ => Ok(Self::default()),
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        let cfg = Self::from_toml(&raw)
            .with_context(|| format!("invalid config: {}", path.display()))?;
        tracing::debug!(config = %path.display(), "loaded config");
        Ok(cfg)
    }
}

fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("org", "slide-thumbs", "slide-thumbs").map(|p| p.config_dir().join(CONFIG_FILE_NAME))
}

/// Resolved run settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub files: Vec<PathBuf>,
    pub indent: usize,
    pub dry_run: bool,
}

impl Settings {
    /// Command line values win over the config file, which wins over defaults.
    pub fn resolve(cli_files: Vec<PathBuf>, cli_indent: Option<usize>, dry_run: bool, file: FileConfig) -> Result<Self> {
        let indent = cli_indent.or(file.indent).unwrap_or(DEFAULT_INDENT);
        if indent > MAX_INDENT {
            bail!("indent {indent} is out of range (0..={MAX_INDENT})");
        }
        let files = if !cli_files.is_empty() {
            cli_files
        } else {
            file.files
                .filter(|f| !f.is_empty())
                .unwrap_or_else(|| vec![PathBuf::from(DEFAULT_FILE)])
        };
        Ok(Self { files, indent, dry_run })
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            files: vec![PathBuf::from(DEFAULT_FILE)],
            indent: DEFAULT_INDENT,
            dry_run: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_settings_means_default_document() {
        let s = Settings::default();
        assert_eq!(s.files, vec![PathBuf::from("Skin_Global_Leaf_Optimized.json")]);
        assert_eq!(s.indent, 4);
        assert!(!s.dry_run);
    }

    #[test]
    fn parses_toml() {
        let cfg = FileConfig::from_toml("files = [\"a.json\", \"b.json\"]\nindent = 2\n").unwrap();
        assert_eq!(cfg.files, Some(vec![PathBuf::from("a.json"), PathBuf::from("b.json")]));
        assert_eq!(cfg.indent, Some(2));
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(FileConfig::from_toml("indnet = 2").is_err());
    }

    #[test]
    fn cli_overrides_config() {
        let cfg = FileConfig { files: Some(vec!["cfg.json".into()]), indent: Some(2) };
        let s = Settings::resolve(vec!["cli.json".into()], Some(8), true, cfg.clone()).unwrap();
        assert_eq!(s.files, vec![PathBuf::from("cli.json")]);
        assert_eq!(s.indent, 8);
        assert!(s.dry_run);

        let s = Settings::resolve(Vec::new(), None, false, cfg).unwrap();
        assert_eq!(s.files, vec![PathBuf::from("cfg.json")]);
        assert_eq!(s.indent, 2);
    }

    #[test]
    fn empty_file_list_falls_back_to_default() {
        let cfg = FileConfig { files: Some(Vec::new()), indent: None };
        let s = Settings::resolve(Vec::new(), None, false, cfg).unwrap();
        assert_eq!(s.files, vec![PathBuf::from(DEFAULT_FILE)]);
    }

    #[test]
    fn out_of_range_indent_is_an_error() {
        let cfg = FileConfig { files: None, indent: Some(usize::MAX) };
        let err = Settings::resolve(Vec::new(), None, false, cfg).unwrap_err();
        assert!(format!("{err}").contains("out of range"));
        assert!(Settings::resolve(Vec::new(), Some(MAX_INDENT + 1), false, FileConfig::default()).is_err());
        assert_eq!(Settings::resolve(Vec::new(), None, false, FileConfig::default()).unwrap(), Settings::default());
    }

    #[test]
    fn explicit_config_path_is_read() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("slide-thumbs.toml");
        fs::write(&path, "indent = 3").unwrap();
        let cfg = FileConfig::locate(Some(path.as_path())).unwrap();
        assert_eq!(cfg.indent, Some(3));
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = FileConfig::locate(Some(tmp.path().join("nope.toml").as_path())).unwrap_err();
        assert!(format!("{err}").contains("nope.toml"));
    }
}
