//! Where the session credential is kept between runs.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{debug, warn};

use super::credential::SessionCredential;

/// Persistence for the session credential, decoupled from its validity.
pub trait CredentialStore: Send + Sync {
    /// The stored credential, or `None` when absent or unreadable.
    fn load(&self) -> Option<SessionCredential>;

    fn save(&self, credential: &SessionCredential) -> std::io::Result<()>;

    fn clear(&self) -> std::io::Result<()>;
}

/// JSON file store, one credential per file.
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Option<SessionCredential> {
        let data = match std::fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(path = %self.path.display(), "failed to read stored credential: {e}");
                return None;
            }
        };

        match serde_json::from_str(&data) {
            Ok(credential) => Some(credential),
            Err(e) => {
                // Unparseable identity data means signed out.
                warn!(path = %self.path.display(), "discarding malformed stored credential: {e}");
                if let Err(e) = std::fs::remove_file(&self.path) {
                    warn!("failed to remove malformed credential: {e}");
                }
                None
            }
        }
    }

    fn save(&self, credential: &SessionCredential) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(credential).map_err(std::io::Error::other)?;
        std::fs::write(&self.path, json)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))?;
        }

        debug!(path = %self.path.display(), "stored session credential");
        Ok(())
    }

    fn clear(&self) -> std::io::Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

/// In-process store for tests and one-shot commands.
#[derive(Default)]
pub struct MemoryCredentialStore {
    slot: Mutex<Option<SessionCredential>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Option<SessionCredential> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }

    fn save(&self, credential: &SessionCredential) -> std::io::Result<()> {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(credential.clone());
        }
        Ok(())
    }

    fn clear(&self) -> std::io::Result<()> {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = None;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{CurrentUser, Role};
    use chrono::Utc;

    fn credential() -> SessionCredential {
        SessionCredential {
            token: "tok".into(),
            user: CurrentUser {
                id: "u1".into(),
                user_name: "ada".into(),
                email: "ada@example.com".into(),
                role: Role::User,
            },
            expires_at: Utc::now() + chrono::Duration::hours(1),
        }
    }

    #[test]
    fn file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join("nested").join("session.json"));

        assert!(store.load().is_none());
        let saved = credential();
        store.save(&saved).unwrap();
        assert_eq!(store.load(), Some(saved));

        store.clear().unwrap();
        assert!(store.load().is_none());
        // Clearing twice is fine.
        store.clear().unwrap();
    }

    #[test]
    fn malformed_file_is_treated_as_signed_out_and_removed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = FileCredentialStore::new(&path);
        assert!(store.load().is_none());
        assert!(!path.exists());
    }

    #[cfg(unix)]
    #[test]
    fn saved_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join("session.json"));
        store.save(&credential()).unwrap();

        let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn memory_store_round_trip() {
        let store = MemoryCredentialStore::new();
        assert!(store.load().is_none());
        store.save(&credential()).unwrap();
        assert_eq!(store.load().unwrap().token, "tok");
        store.clear().unwrap();
        assert!(store.load().is_none());
    }
}
