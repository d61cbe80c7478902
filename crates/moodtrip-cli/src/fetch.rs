//! GoEmotions corpus download

use anyhow::Context;
use std::path::{Path, PathBuf};
use tracing::info;

const GOEMOTIONS_BASE_URL: &str =
    "https://raw.githubusercontent.com/google-research/google-research/master/goemotions/data";

/// Corpus splits, in the order the builder reads them
pub const SPLITS: [&str; 3] = ["train", "dev", "test"];

/// Download URL of a split
pub fn split_url(split: &str) -> String {
    format!("{}/{}.tsv", GOEMOTIONS_BASE_URL, split)
}

/// Local path a split is stored at
pub fn split_path(dir: &Path, split: &str) -> PathBuf {
    dir.join(format!("goemotions-{}.tsv", split))
}

/// Download every split into `dir`, skipping existing files unless `force`.
///
/// Returns the paths that were written.
pub async fn fetch_corpus(dir: &Path, force: bool) -> anyhow::Result<Vec<PathBuf>> {
    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    let client = reqwest::Client::new();
    let mut written = Vec::new();

    for split in SPLITS {
        let path = split_path(dir, split);
        if path.exists() && !force {
            info!("{} already present, skipping", path.display());
            continue;
        }

        let url = split_url(split);
        info!("Downloading GoEmotions {} split from {}", split, url);

        let body = client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Request to {} failed", url))?
            .error_for_status()
            .with_context(|| format!("Failed to download {}", url))?
            .bytes()
            .await?;

        tokio::fs::write(&path, &body)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Saved {} bytes to {}", body.len(), path.display());
        written.push(path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_locations() {
        assert!(split_url("dev").ends_with("/goemotions/data/dev.tsv"));
        assert_eq!(
            split_path(Path::new("data"), "train"),
            PathBuf::from("data/goemotions-train.tsv")
        );
    }

    #[tokio::test]
    async fn test_existing_splits_are_skipped() {
        let dir = tempfile::TempDir::new().unwrap();
        for split in SPLITS {
            std::fs::write(split_path(dir.path(), split), "text\t0\tid\n").unwrap();
        }

        let written = fetch_corpus(dir.path(), false).await.unwrap();
        assert!(written.is_empty());
    }
}
