use crate::{
    error::{Error, Result},
    resolve::DependencyMatch,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAMES: [&str; 2] = [".mapmap.json", "mapmap.json"];

fn default_impl_suffix() -> String {
    "Impl".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct Config {
    /// Directory generated files are written to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,

    /// Package root containing `Cargo.toml`; found by walking up when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crate_root: Option<PathBuf>,

    #[serde(default)]
    pub dependency_match: DependencyMatch,

    /// Appended to the trait name to name the generated type
    #[serde(default = "default_impl_suffix")]
    pub impl_suffix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: None,
            crate_root: None,
            dependency_match: DependencyMatch::default(),
            impl_suffix: default_impl_suffix(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&contents)
            .map_err(|e| Error::ConfigError(format!("Failed to parse {}: {e}", path.display())))?;
        config.validate()?;

        // Relative paths are relative to the config file
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        Ok(Config {
            output_dir: config.output_dir.map(|p| base.join(p)),
            crate_root: config.crate_root.map(|p| base.join(p)),
            ..config
        })
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn find_config_file(start_path: &Path) -> Option<PathBuf> {
        let mut current = start_path;

        loop {
            for name in CONFIG_FILE_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    return Some(config_path);
                }
            }

            current = current.parent()?;
        }
    }

    pub fn validate(&self) -> Result<()> {
        let suffix = &self.impl_suffix;
        let valid = !suffix.is_empty()
            && suffix
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid {
            return Err(Error::ConfigError(format!(
                "impl_suffix `{suffix}` is not a valid identifier suffix"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.impl_suffix, "Impl");
        assert_eq!(config.dependency_match, DependencyMatch::Substring);
    }

    #[test]
    fn test_load_resolves_relative_paths() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".mapmap.json");
        fs::write(
            &path,
            r#"{ "output_dir": "src/generated", "dependency_match": "segment", "impl_suffix": "Mapper" }"#,
        )
        .unwrap();

        let config = Config::load_from_file(&path).unwrap();
        assert_eq!(config.output_dir, Some(temp.path().join("src/generated")));
        assert_eq!(config.dependency_match, DependencyMatch::Segment);
        assert_eq!(config.impl_suffix, "Mapper");
        assert!(config.crate_root.is_none());
    }

    #[test]
    fn test_rejects_unknown_fields_and_bad_suffix() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("mapmap.json");

        fs::write(&path, r#"{ "outputdir": "gen" }"#).unwrap();
        assert!(matches!(
            Config::load_from_file(&path),
            Err(Error::ConfigError(_))
        ));

        fs::write(&path, r#"{ "impl_suffix": "Im pl" }"#).unwrap();
        assert!(matches!(
            Config::load_from_file(&path),
            Err(Error::ConfigError(_))
        ));
    }

    #[test]
    fn test_find_config_file_walks_up() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(temp.path().join("mapmap.json"), "{}").unwrap();

        assert_eq!(
            Config::find_config_file(&nested),
            Some(temp.path().join("mapmap.json"))
        );
    }

    #[test]
    fn test_save_round_trip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".mapmap.json");
        let config = Config {
            dependency_match: DependencyMatch::Segment,
            ..Default::default()
        };
        config.save_to_file(&path).unwrap();
        assert_eq!(Config::load_from_file(&path).unwrap(), config);
    }
}
