use super::GeneratedUnit;
use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Write a unit into `output_dir`, replacing any existing file of the same name
pub fn persist(unit: &GeneratedUnit, output_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(output_dir).map_err(|source| Error::OutputWrite {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let path = output_dir.join(unit.file_name());
    fs::write(&path, &unit.source).map_err(|source| Error::OutputWrite {
        path: path.clone(),
        source,
    })?;

    info!("Generated implementation file: {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn unit(source: &str) -> GeneratedUnit {
        GeneratedUnit {
            interface_name: "UserAssembler".into(),
            impl_type_name: "UserAssemblerImpl".into(),
            source: source.into(),
        }
    }

    #[test]
    fn test_writes_lowercased_file_name() {
        let temp = TempDir::new().unwrap();
        let path = persist(&unit("// one"), temp.path()).unwrap();
        assert_eq!(path, temp.path().join("userassemblerimpl.rs"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "// one");
    }

    #[test]
    fn test_overwrites_existing_file() {
        let temp = TempDir::new().unwrap();
        persist(&unit("// old contents that are longer"), temp.path()).unwrap();
        let path = persist(&unit("// new"), temp.path()).unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "// new");
    }

    #[test]
    fn test_creates_missing_output_directory() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("gen").join("asm");
        let path = persist(&unit(""), &nested).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_reports_write_failures() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("not_a_dir");
        fs::write(&blocker, "").unwrap();

        let err = persist(&unit(""), &blocker).unwrap_err();
        assert!(matches!(err, Error::OutputWrite { .. }));
    }
}
