use anyhow::{Context, Result};
use mapmap_core::Config;
use std::{
    env,
    path::{Path, PathBuf},
};
use tracing::info;

const CONFIG_FILE_NAME: &str = ".mapmap.json";

pub fn init_command(cwd: Option<&Path>, force: bool) -> Result<()> {
    let project_root = match cwd {
        Some(cwd) => cwd.to_path_buf(),
        None => env::current_dir().context("Failed to get current directory")?,
    };
    let project_root = project_root
        .canonicalize()
        .context("Failed to canonicalize project root")?;

    let config_path = project_root.join(CONFIG_FILE_NAME);
    if config_path.exists() && !force {
        println!("❌ Config already exists at: {}", config_path.display());
        println!("   Use --force to overwrite");
        return Ok(());
    }

    let config = Config {
        output_dir: Some(PathBuf::from("src/generated")),
        ..Config::default()
    };
    config
        .save_to_file(&config_path)
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

    info!("Wrote {}", config_path.display());
    println!("✅ Created config: {}", config_path.display());
    Ok(())
}
