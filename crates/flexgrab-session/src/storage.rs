//! Durable credential storage.
//!
//! The persisted state is two key-value entries in the data directory:
//! `user` (a JSON-serialized [`UserRecord`]) and `token` (the raw
//! bearer string). Both present or both absent are the only valid
//! combinations; anything else reads as absent.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use thiserror::Error;
use tracing::debug;

use flexgrab_core::UserRecord;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Key under which the user record is stored.
const USER_KEY: &str = "user";

/// Key under which the bearer token is stored.
const TOKEN_KEY: &str = "token";

/// Errors from the credential storage layer.
///
/// The session store absorbs these; they never propagate to screens.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("could not determine data directory")]
    NoDataDir,

    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed user entry: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// File-backed key-value storage for the credential blob.
#[derive(Debug, Clone)]
pub struct CredentialStorage {
    dir: PathBuf,
}

impl CredentialStorage {
    /// Open storage in the platform data directory, creating it if needed.
    pub fn open_default() -> Result<Self, StorageError> {
        let dirs = ProjectDirs::from("", "", "flexgrab").ok_or(StorageError::NoDataDir)?;
        let dir = dirs.data_dir().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Open storage rooted at an explicit directory.
    pub fn at(dir: impl AsRef<Path>) -> Result<Self, StorageError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Persist the credential blob, replacing any previous entries.
    ///
    /// Both entries are staged to temporary files and renamed into
    /// place, so a failed save leaves the previous blob intact.
    pub fn save(&self, user: &UserRecord, token: &str) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(user)?;

        let user_tmp = self.stage(USER_KEY, json.as_bytes())?;
        let token_tmp = match self.stage(TOKEN_KEY, token.as_bytes()) {
            Ok(path) => path,
            Err(e) => {
                let _ = fs::remove_file(&user_tmp);
                return Err(e);
            }
        };

        if let Err(e) = fs::rename(&user_tmp, self.dir.join(USER_KEY)) {
            let _ = fs::remove_file(&token_tmp);
            return Err(e.into());
        }
        if let Err(e) = fs::rename(&token_tmp, self.dir.join(TOKEN_KEY)) {
            // The user entry already landed; erase it to keep the
            // both-or-neither invariant on disk.
            let _ = self.clear();
            return Err(e.into());
        }

        debug!(dir = %self.dir.display(), "credential blob saved");
        Ok(())
    }

    /// Write an entry to its staging path with restrictive permissions.
    fn stage(&self, key: &str, bytes: &[u8]) -> Result<PathBuf, StorageError> {
        let path = self.dir.join(format!("{key}.tmp"));
        fs::write(&path, bytes)?;

        #[cfg(unix)]
        {
            let mut perms = fs::metadata(&path)?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&path, perms)?;
        }

        Ok(path)
    }

    /// Read the credential blob.
    ///
    /// Returns `Ok(None)` when either entry is missing; only a
    /// both-present pair counts as a stored session. A present but
    /// malformed user entry is an error the caller treats as absence.
    pub fn load(&self) -> Result<Option<(UserRecord, String)>, StorageError> {
        let token = match fs::read_to_string(self.dir.join(TOKEN_KEY)) {
            Ok(token) => token,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let json = match fs::read_to_string(self.dir.join(USER_KEY)) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let user: UserRecord = serde_json::from_str(&json)?;
        Ok(Some((user, token)))
    }

    /// Erase both entries. Missing entries are not an error.
    pub fn clear(&self) -> Result<(), StorageError> {
        for key in [USER_KEY, TOKEN_KEY] {
            match fs::remove_file(self.dir.join(key)) {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        debug!(dir = %self.dir.display(), "credential blob cleared");
        Ok(())
    }

    /// Returns true if both entries are present.
    pub fn is_populated(&self) -> bool {
        self.dir.join(USER_KEY).exists() && self.dir.join(TOKEN_KEY).exists()
    }
}
