use std::path::PathBuf;

use crate::{Error, Result};

/// Where uploaded profile photos are kept
#[derive(Serialize, Deserialize, Clone)]
pub struct FileStorageConfig {
    /// Root directory for stored files
    pub root: PathBuf,
}

impl Default for FileStorageConfig {
    fn default() -> FileStorageConfig {
        FileStorageConfig {
            root: "uploads".into(),
        }
    }
}

impl FileStorageConfig {
    /// Store photo bytes, returning a stable relative reference
    pub async fn store_photo(&self, filename: &str, bytes: &[u8]) -> Result<String> {
        let name = format!("{}-{}", ulid::Ulid::new(), sanitise(filename));

        let dir = self.root.join("agents");
        async_std::fs::create_dir_all(&dir)
            .await
            .map_err(|_| Error::InternalError)?;

        async_std::fs::write(dir.join(&name), bytes)
            .await
            .map_err(|_| Error::InternalError)?;

        Ok(format!("agents/{}", name))
    }

    /// Best-effort removal of a stored file
    ///
    /// A missing or undeletable file never fails the caller.
    pub async fn remove(&self, reference: &str) {
        if let Err(err) = async_std::fs::remove_file(self.root.join(reference)).await {
            warn!("Failed to remove stored file {}: {}", reference, err);
        }
    }
}

fn sanitise(filename: &str) -> String {
    let clean: String = filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if clean.is_empty() {
        "photo".to_string()
    } else {
        clean
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitise_strips_path_separators() {
        assert_eq!(sanitise("../../etc/passwd"), ".._.._etc_passwd");
        assert_eq!(sanitise(""), "photo");
        assert_eq!(sanitise("head shot.png"), "head_shot.png");
    }

    #[async_std::test]
    async fn store_and_remove_round_trip() {
        let files = FileStorageConfig {
            root: std::env::temp_dir().join(format!("registrar-files-{}", ulid::Ulid::new())),
        };

        let reference = files.store_photo("photo.png", b"not a real png").await.unwrap();
        assert!(reference.starts_with("agents/"));
        assert!(reference.ends_with("photo.png"));

        let stored = async_std::fs::read(files.root.join(&reference)).await.unwrap();
        assert_eq!(stored, b"not a real png");

        files.remove(&reference).await;
        assert!(async_std::fs::read(files.root.join(&reference)).await.is_err());

        // removing again is fine
        files.remove(&reference).await;
    }
}
