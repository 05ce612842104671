//! `orchard verify`: re-check written proofs against the written root.

use anyhow::Context;
use clap::Args;
use std::path::{Path, PathBuf};

use orchard_core::{ChecksumAddress, H256};
use orchard_distribution::{verify_claims, ClaimsDocument, RecipientClaims};

use super::{read_json, ROOT_FILE, TREE_FILE};
use crate::config::DistributionConfig;

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Directory written by `orchard tree`.
    #[arg(short, long)]
    pub dir: Option<PathBuf>,
}

pub async fn run(args: &VerifyArgs, config: &DistributionConfig) -> anyhow::Result<()> {
    let dir = args.dir.as_ref().unwrap_or(&config.output_dir);
    let verified = verify_dir(dir).await?;
    println!("All {verified} claims in {} verify against the root", dir.display());
    Ok(())
}

/// Verify a distribution directory in either layout.
///
/// Returns the number of verified claims.
pub async fn verify_dir(dir: &Path) -> anyhow::Result<usize> {
    let root: H256 = read_json(&dir.join(ROOT_FILE)).await?;
    let claims = load_claims(dir).await?;
    let verified = verify_claims(&claims, &root.to_fixed_bytes())?;
    tracing::info!(dir = %dir.display(), verified, "distribution verified");
    Ok(verified)
}

/// Read tree.json, or collect the per-recipient files if it is absent.
async fn load_claims(dir: &Path) -> anyhow::Result<ClaimsDocument> {
    let tree_path = dir.join(TREE_FILE);
    if tokio::fs::try_exists(&tree_path).await? {
        return read_json(&tree_path).await;
    }

    let mut claims = ClaimsDocument::new();
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .with_context(|| format!("listing {}", dir.display()))?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let Ok(recipient) = stem.parse::<ChecksumAddress>() else {
            tracing::debug!(file = %path.display(), "skipping non-recipient file");
            continue;
        };
        let recipient_claims: RecipientClaims = read_json(&path).await?;
        claims.insert(recipient, recipient_claims);
    }
    Ok(claims)
}
