use crate::error::AuthError;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Key the bearer token is stored under
pub const TOKEN_KEY: &str = "auth_token";

const STORE_FILE: &str = "auth.json";

/// Durable key/value file holding the session token.
///
/// The file survives restarts; the token is only removed by
/// [`TokenStore::delete_token`].
#[derive(Debug)]
pub struct TokenStore {
    store_path: PathBuf,
}

impl TokenStore {
    /// Store in the user cache directory (`<cache>/leboncoin/auth.json`)
    pub fn new() -> Result<Self, AuthError> {
        let cache_dir = Self::get_cache_dir()?;
        Self::at(cache_dir.join(STORE_FILE))
    }

    /// Store at an explicit file location
    pub fn at(store_path: impl Into<PathBuf>) -> Result<Self, AuthError> {
        let store_path = store_path.into();

        // Create parent directory if it doesn't exist
        if let Some(parent) = store_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    AuthError::TokenStorage(format!("Failed to create store directory: {}", e))
                })?;
            }
        }

        Ok(Self { store_path })
    }

    fn get_cache_dir() -> Result<PathBuf, AuthError> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| AuthError::Configuration("Could not find cache directory".to_string()))?
            .join("leboncoin");
        Ok(cache_dir)
    }

    pub fn path(&self) -> &Path {
        &self.store_path
    }

    /// Persist `token`, replacing any previous one
    pub fn save_token(&self, token: &str) -> Result<(), AuthError> {
        let mut entries = match self.read_entries() {
            Err(AuthError::Json(e)) => {
                tracing::warn!(
                    "Overwriting unreadable token store {}: {}",
                    self.store_path.display(),
                    e
                );
                BTreeMap::new()
            }
            entries => entries?,
        };
        entries.insert(TOKEN_KEY.to_string(), token.to_string());
        self.write_entries(&entries)
    }

    pub fn load_token(&self) -> Result<Option<String>, AuthError> {
        let mut entries = self.read_entries()?;
        Ok(entries.remove(TOKEN_KEY))
    }

    /// Remove the token. Removing an absent token is not an error.
    pub fn delete_token(&self) -> Result<(), AuthError> {
        let mut entries = match self.read_entries() {
            Err(AuthError::Json(e)) => {
                tracing::warn!(
                    "Removing unreadable token store {}: {}",
                    self.store_path.display(),
                    e
                );
                return self.remove_file();
            }
            entries => entries?,
        };
        if entries.remove(TOKEN_KEY).is_none() {
            return Ok(());
        }

        if entries.is_empty() {
            self.remove_file()
        } else {
            self.write_entries(&entries)
        }
    }

    fn remove_file(&self) -> Result<(), AuthError> {
        fs::remove_file(&self.store_path)
            .map_err(|e| AuthError::TokenStorage(format!("Failed to delete token: {}", e)))
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>, AuthError> {
        if !self.store_path.exists() {
            return Ok(BTreeMap::new());
        }

        let json = fs::read_to_string(&self.store_path)
            .map_err(|e| AuthError::TokenStorage(format!("Failed to read token: {}", e)))?;

        Ok(serde_json::from_str(&json)?)
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<(), AuthError> {
        let json = serde_json::to_string_pretty(entries)?;

        fs::write(&self.store_path, json)
            .map_err(|e| AuthError::TokenStorage(format!("Failed to save token: {}", e)))?;

        // Set permissions to 0600 (read/write for owner only)
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(&self.store_path)
                .map_err(|e| {
                    AuthError::TokenStorage(format!("Failed to get file permissions: {}", e))
                })?
                .permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&self.store_path, perms).map_err(|e| {
                AuthError::TokenStorage(format!("Failed to set file permissions: {}", e))
            })?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_store() -> (TempDir, TokenStore) {
        let dir = TempDir::new().unwrap();
        let store = TokenStore::at(dir.path().join("nested").join(STORE_FILE)).unwrap();
        (dir, store)
    }

    #[test]
    fn test_load_without_file_is_none() {
        let (_dir, store) = temp_store();
        assert_eq!(store.load_token().unwrap(), None);
    }

    #[test]
    fn test_save_overwrites_previous_token() {
        let (_dir, store) = temp_store();
        store.save_token("first").unwrap();
        store.save_token("second").unwrap();

        assert_eq!(store.load_token().unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn test_token_survives_a_fresh_store() {
        let (dir, store) = temp_store();
        store.save_token("opaque.jwt.value").unwrap();
        drop(store);

        let reopened = TokenStore::at(dir.path().join("nested").join(STORE_FILE)).unwrap();
        assert_eq!(
            reopened.load_token().unwrap().as_deref(),
            Some("opaque.jwt.value")
        );
    }

    #[test]
    fn test_token_is_stored_under_fixed_key() {
        let (_dir, store) = temp_store();
        store.save_token("abc").unwrap();

        let raw = fs::read_to_string(store.path()).unwrap();
        let entries: BTreeMap<String, String> = serde_json::from_str(&raw).unwrap();
        assert_eq!(entries.get(TOKEN_KEY).map(String::as_str), Some("abc"));
    }

    #[test]
    fn test_delete_is_idempotent() {
        let (_dir, store) = temp_store();
        store.delete_token().unwrap();

        store.save_token("abc").unwrap();
        store.delete_token().unwrap();
        store.delete_token().unwrap();

        assert_eq!(store.load_token().unwrap(), None);
        assert!(!store.path().exists());
    }

    #[test]
    fn test_delete_keeps_unrelated_entries() {
        let (_dir, store) = temp_store();
        fs::write(store.path(), r#"{"auth_token":"abc","theme":"dark"}"#).unwrap();

        store.delete_token().unwrap();

        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("theme"));
        assert!(!raw.contains("auth_token"));
    }

    #[test]
    fn test_save_replaces_corrupt_store() {
        let (_dir, store) = temp_store();
        fs::write(store.path(), "{ not json").unwrap();

        store.save_token("fresh").unwrap();

        assert_eq!(store.load_token().unwrap().as_deref(), Some("fresh"));
    }

    #[test]
    fn test_save_replaces_store_with_non_string_values() {
        let (_dir, store) = temp_store();
        fs::write(store.path(), r#"{"auth_token":42}"#).unwrap();

        store.save_token("fresh").unwrap();

        assert_eq!(store.load_token().unwrap().as_deref(), Some("fresh"));
    }

    #[test]
    fn test_delete_removes_corrupt_store() {
        let (_dir, store) = temp_store();
        fs::write(store.path(), "{ not json").unwrap();

        store.delete_token().unwrap();

        assert!(!store.path().exists());
        assert_eq!(store.load_token().unwrap(), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_store_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let (_dir, store) = temp_store();
        store.save_token("abc").unwrap();

        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
