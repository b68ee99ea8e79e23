use super::{ModuleRegistry, ModuleSource, normalize_module_path};
use crate::error::{Error, Result};
use cargo_toml::Manifest;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Module registry that maps `crate::a::b` onto the files of a Cargo package
#[derive(Debug, Clone)]
pub struct CrateModuleRegistry {
    src_dir: PathBuf,
    root_file: PathBuf,
    /// Package name with `-` replaced by `_`, accepted in place of `crate`
    crate_name: Option<String>,
}

impl CrateModuleRegistry {
    /// Open the package whose `Cargo.toml` lives in `crate_root`
    pub fn open(crate_root: &Path) -> Result<Self> {
        let manifest_path = crate_root.join("Cargo.toml");
        let contents = std::fs::read_to_string(&manifest_path)?;
        let manifest = Manifest::from_str(&contents).map_err(|e| {
            Error::ParseError(format!(
                "Failed to parse {}: {e}",
                manifest_path.display()
            ))
        })?;

        let crate_name = manifest
            .package
            .as_ref()
            .map(|pkg| pkg.name.replace('-', "_"));

        let lib_path = manifest.lib.as_ref().and_then(|lib| lib.path.clone());
        let root_file = match lib_path {
            Some(path) => crate_root.join(path),
            None => {
                let lib = crate_root.join("src").join("lib.rs");
                if lib.exists() {
                    lib
                } else {
                    crate_root.join("src").join("main.rs")
                }
            }
        };
        let src_dir = root_file
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| crate_root.join("src"));

        debug!(
            "Opened crate {:?} rooted at {}",
            crate_name,
            root_file.display()
        );

        Ok(Self {
            src_dir,
            root_file,
            crate_name,
        })
    }

    /// Registry over a bare source directory, with `lib.rs` or `main.rs` as its root
    pub fn from_src_dir(src_dir: impl Into<PathBuf>) -> Self {
        let src_dir = src_dir.into();
        let lib = src_dir.join("lib.rs");
        let root_file = if lib.exists() {
            lib
        } else {
            src_dir.join("main.rs")
        };
        Self {
            src_dir,
            root_file,
            crate_name: None,
        }
    }

    pub fn src_dir(&self) -> &Path {
        &self.src_dir
    }

    pub fn crate_name(&self) -> Option<&str> {
        self.crate_name.as_deref()
    }

    /// Find the nearest `Cargo.toml` at or above `start_path`
    pub fn find_cargo_toml(start_path: &Path) -> Option<PathBuf> {
        let abs_path = if start_path.is_relative() {
            std::env::current_dir().ok()?.join(start_path)
        } else {
            start_path.to_path_buf()
        };

        let mut current = if abs_path.is_file() {
            abs_path.parent()?
        } else {
            &abs_path
        };

        loop {
            let cargo_toml = current.join("Cargo.toml");
            if cargo_toml.exists() {
                return Some(cargo_toml);
            }
            current = current.parent()?;
        }
    }

    /// Module path of a source file in this crate, e.g. `src/demo/asm.rs` -> `crate::demo::asm`
    pub fn module_path_from_file(&self, file_path: &Path) -> String {
        let relative = file_path.strip_prefix(&self.src_dir).unwrap_or(file_path);
        let mut module_parts = vec!["crate".to_string()];

        if file_path == self.root_file {
            return module_parts.join("::");
        }

        for component in relative.components() {
            let Component::Normal(part) = component else {
                continue;
            };
            let Some(part) = part.to_str() else {
                continue;
            };
            if part == "mod.rs" || part == "lib.rs" || part == "main.rs" {
                continue;
            }
            module_parts.push(part.strip_suffix(".rs").unwrap_or(part).to_string());
        }

        module_parts.join("::")
    }

    fn segments<'a>(&self, module_path: &'a str) -> Option<Vec<&'a str>> {
        let mut parts = module_path.split("::").map(str::trim);
        let head = parts.next()?;
        let local = head == "crate" || self.crate_name.as_deref() == Some(head);
        local.then(|| parts.collect())
    }

    fn module_file(&self, segments: &[&str]) -> Option<PathBuf> {
        if segments.is_empty() {
            return self.root_file.exists().then(|| self.root_file.clone());
        }

        let mut dir = self.src_dir.clone();
        for segment in &segments[..segments.len() - 1] {
            dir.push(segment);
        }
        let last = segments[segments.len() - 1];

        let flat = dir.join(format!("{last}.rs"));
        if flat.is_file() {
            return Some(flat);
        }
        let nested = dir.join(last).join("mod.rs");
        nested.is_file().then_some(nested)
    }
}

impl ModuleRegistry for CrateModuleRegistry {
    fn load(&self, module_path: &str) -> Result<ModuleSource> {
        let requested = normalize_module_path(module_path);
        let segments = self.segments(requested).ok_or_else(|| Error::ModuleNotFound {
            module_path: requested.to_string(),
            reason: "path does not start with `crate`".to_string(),
        })?;

        // Deepest file module wins; the remaining segments are inline modules
        for split in (0..=segments.len()).rev() {
            let Some(file) = self.module_file(&segments[..split]) else {
                continue;
            };
            debug!("Module {} found in {}", requested, file.display());
            let source = std::fs::read_to_string(&file)?;
            return Ok(ModuleSource {
                module_path: requested.to_string(),
                source,
                origin: Some(file),
                inline_path: segments[split..].iter().map(|s| s.to_string()).collect(),
            });
        }

        Err(Error::ModuleNotFound {
            module_path: requested.to_string(),
            reason: format!("no source file under {}", self.src_dir.display()),
        })
    }
}
