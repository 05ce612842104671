//! `orchard init`: write a default configuration file.

use clap::Args;
use std::path::PathBuf;

use crate::config::OrchardConfig;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to initialize (defaults to current directory).
    #[arg(default_value = ".")]
    pub dir: PathBuf,
}

pub fn run(args: &InitArgs) -> anyhow::Result<()> {
    let config_path = args.dir.join("orchard.toml");

    if config_path.exists() {
        anyhow::bail!("configuration file already exists at {}", config_path.display());
    }

    OrchardConfig::default().save(&config_path)?;

    println!("Initialized orchard configuration at {}", config_path.display());
    println!("Run 'orchard tree --input <amounts.json>' to build a distribution.");
    Ok(())
}
