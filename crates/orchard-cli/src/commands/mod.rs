pub mod init;
pub mod cumulative;
pub mod tree;
pub mod verify;

use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

/// File holding the root as a JSON string.
pub const ROOT_FILE: &str = "root.json";
/// File holding every recipient's claims.
pub const TREE_FILE: &str = "tree.json";

pub async fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("parsing {}", path.display()))
}

pub async fn write_json<T: Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    let contents = serde_json::to_string_pretty(value)?;
    tokio::fs::write(path, contents)
        .await
        .with_context(|| format!("writing {}", path.display()))
}

#[cfg(test)]
pub(crate) fn scratch_dir(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("orchard-{}-{:016x}", name, rand::random::<u64>()))
}
