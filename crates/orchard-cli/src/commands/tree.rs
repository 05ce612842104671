//! `orchard tree`: build the channel Merkle tree and write root and proofs.

use clap::Args;
use futures::future::try_join_all;
use std::path::{Path, PathBuf};

use orchard_core::hash_to_hex;
use orchard_distribution::{Amounts, Distribution};

use super::{read_json, write_json, ROOT_FILE, TREE_FILE};
use crate::config::DistributionConfig;

#[derive(Args, Debug)]
pub struct TreeArgs {
    /// Cumulative amounts to commit to.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output directory. Removed and recreated on every run.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write one `<recipient>.json` per recipient instead of tree.json.
    #[arg(long)]
    pub separate: bool,
}

pub async fn run(args: &TreeArgs, config: &DistributionConfig) -> anyhow::Result<()> {
    let output = args.output.as_ref().unwrap_or(&config.output_dir);
    let separate = args.separate || config.separate;

    let amounts: Amounts = read_json(&args.input).await?;
    let distribution = Distribution::build(&amounts)?;
    let written = write_distribution(output, &distribution, separate).await?;

    println!("Merkle root: {}", hash_to_hex(&distribution.root()));
    println!(
        "Wrote {} files for {} entries to {}",
        written.len(),
        distribution.entry_count(),
        output.display()
    );
    Ok(())
}

/// Replace `dir` with the distribution's root and claim files.
///
/// Returns the paths written.
pub async fn write_distribution(
    dir: &Path,
    distribution: &Distribution,
    separate: bool,
) -> anyhow::Result<Vec<PathBuf>> {
    if tokio::fs::try_exists(dir).await? {
        tokio::fs::remove_dir_all(dir).await?;
    }
    tokio::fs::create_dir_all(dir).await?;

    let root_path = dir.join(ROOT_FILE);
    write_json(&root_path, &distribution.root_document()).await?;
    let mut written = vec![root_path];

    if !separate {
        let tree_path = dir.join(TREE_FILE);
        write_json(&tree_path, distribution.claims()).await?;
        written.push(tree_path);
    } else {
        let writes = distribution.claims().iter().map(|(recipient, claims)| {
            let path = dir.join(format!("{recipient}.json"));
            async move {
                write_json(&path, claims).await?;
                Ok::<_, anyhow::Error>(path)
            }
        });
        written.extend(try_join_all(writes).await?);
    }

    tracing::info!(
        dir = %dir.display(),
        files = written.len(),
        separate,
        "distribution written"
    );
    Ok(written)
}
