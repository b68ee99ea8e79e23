use anyhow::{Context, Result, bail};
use mapmap_core::{
    Config, CrateModuleRegistry, GenerationReport, InterfaceDeclaration, MappingGenerator,
    resolve::DependencyMatch, scan_interfaces,
};
use std::{
    env, fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

use crate::cli::GenerateArgs;
use crate::utils::collect_rust_files;

pub fn generate_command(args: &GenerateArgs) -> Result<GenerationReport> {
    let cwd = env::current_dir().context("Failed to get current directory")?;
    let config = load_config(args, &cwd)?;
    debug!("Effective config: {:?}", config);

    let Some(output_dir) = args.output.clone().or_else(|| config.output_dir.clone()) else {
        bail!("No output directory: pass --output or set `output_dir` in the config");
    };

    let (input, files) = match (&args.file, &args.dir) {
        (Some(file), _) => {
            if !file.is_file() {
                bail!("File not found: {}", file.display());
            }
            (file.clone(), vec![file.clone()])
        }
        (None, Some(dir)) => {
            if !dir.is_dir() {
                bail!("Directory not found: {}", dir.display());
            }
            (dir.clone(), collect_rust_files(dir))
        }
        (None, None) => bail!("Pass either --file or --dir"),
    };

    if files.is_empty() {
        bail!("No Rust files found under {}", input.display());
    }

    let registry = open_registry(args.crate_root.as_deref().or(config.crate_root.as_deref()), &input)?;
    info!(
        "Scanning {} file(s) against {}",
        files.len(),
        registry.src_dir().display()
    );

    let interfaces = discover(&registry, &files);
    if interfaces.is_empty() {
        warn!("No `mapmap:assembler` traits found");
    }

    let generator = MappingGenerator::with_config(registry, &config);
    Ok(generator.generate_all(&interfaces, &output_dir))
}

fn load_config(args: &GenerateArgs, cwd: &Path) -> Result<Config> {
    let config_path = args.config.clone().or_else(|| Config::find_config_file(cwd));
    let mut config = match config_path {
        Some(path) => {
            debug!("Loading config from {}", path.display());
            Config::load_from_file(&path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?
        }
        None => Config::default(),
    };

    if args.strict_deps {
        config.dependency_match = DependencyMatch::Segment;
    }
    Ok(config)
}

fn open_registry(crate_root: Option<&Path>, input: &Path) -> Result<CrateModuleRegistry> {
    let crate_root: Option<PathBuf> = match crate_root {
        Some(root) => Some(root.to_path_buf()),
        None => CrateModuleRegistry::find_cargo_toml(input)
            .and_then(|manifest| manifest.parent().map(Path::to_path_buf)),
    };

    match crate_root {
        Some(root) => {
            let root = root
                .canonicalize()
                .with_context(|| format!("Failed to canonicalize {}", root.display()))?;
            CrateModuleRegistry::open(&root)
                .with_context(|| format!("Failed to open crate at {}", root.display()))
        }
        None => {
            // No manifest: treat the input's own directory as the source root
            let dir = if input.is_dir() {
                input.to_path_buf()
            } else {
                input.parent().map(Path::to_path_buf).unwrap_or_default()
            };
            let dir = dir
                .canonicalize()
                .with_context(|| format!("Failed to canonicalize {}", dir.display()))?;
            warn!("No Cargo.toml found; using {} as the source root", dir.display());
            Ok(CrateModuleRegistry::from_src_dir(dir))
        }
    }
}

fn discover(registry: &CrateModuleRegistry, files: &[PathBuf]) -> Vec<InterfaceDeclaration> {
    let mut interfaces = Vec::new();

    for file in files {
        let path = match file.canonicalize() {
            Ok(path) => path,
            Err(e) => {
                warn!("Skipping {}: {}", file.display(), e);
                continue;
            }
        };
        let source = match fs::read_to_string(&path) {
            Ok(source) => source,
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                continue;
            }
        };

        let module_path = registry.module_path_from_file(&path);
        match scan_interfaces(&source, &module_path) {
            Ok(found) => {
                debug!("{} ({}): {} interface(s)", path.display(), module_path, found.len());
                interfaces.extend(found);
            }
            Err(e) => warn!("Skipping {}: {}", path.display(), e),
        }
    }

    interfaces
}
