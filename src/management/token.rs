use std::path::{Path, PathBuf};

use crate::{Res, error::Error, types::Token, warning};

/// File backed cache for the single OAuth token of this installation.
///
/// The store itself does no locking. [`crate::spotify::AuthManager`] owns it
/// behind a mutex so that concurrent refreshes never interleave their writes.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        TokenStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the cached token, or `None` when nothing usable is stored.
    ///
    /// A cache file that cannot be read or parsed is reported and treated
    /// as absent, so the user is asked to log in again instead of failing.
    pub async fn load(&self) -> Res<Option<Token>> {
        let content = match async_fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                warning!("Couldn't read token cache at {}: {}", self.path.display(), e);
                return Ok(None);
            }
        };

        match serde_json::from_str::<Token>(&content) {
            Ok(token) => Ok(Some(token)),
            Err(e) => {
                warning!("Ignoring corrupt token cache at {}: {}", self.path.display(), e);
                Ok(None)
            }
        }
    }

    /// Writes the token, replacing whatever was cached before.
    ///
    /// The JSON is written to a sibling temp file first and then renamed
    /// over the cache file so readers never observe a partial write.
    pub async fn persist(&self, token: &Token) -> Res<()> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(token)?;
        let tmp = self.path.with_extension("json.tmp");
        async_fs::write(&tmp, json).await?;
        async_fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| Error::Cache(format!("failed to replace {}: {}", self.path.display(), e)))
    }
}
