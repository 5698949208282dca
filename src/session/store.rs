//! Credential persistence
//!
//! A [`CredentialStore`] holds the three session entries under fixed key
//! names. It does no validation; the session manager is its only writer.

use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock};

use crate::error::{Result, StoreError};

/// The persisted session entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StorageKey {
    Token,
    SubjectId,
    DisplayName,
}

impl StorageKey {
    pub const ALL: [StorageKey; 3] = [
        StorageKey::Token,
        StorageKey::SubjectId,
        StorageKey::DisplayName,
    ];

    /// Literal key name used on disk.
    pub fn as_str(self) -> &'static str {
        match self {
            StorageKey::Token => "token",
            StorageKey::SubjectId => "studentID",
            StorageKey::DisplayName => "studentName",
        }
    }
}

/// Values written by a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub token: String,
    pub subject_id: Option<String>,
    pub display_name: Option<String>,
}

impl Credentials {
    fn entries(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        map.insert(StorageKey::Token.as_str().to_string(), self.token.clone());
        if let Some(ref id) = self.subject_id {
            map.insert(StorageKey::SubjectId.as_str().to_string(), id.clone());
        }
        if let Some(ref name) = self.display_name {
            map.insert(StorageKey::DisplayName.as_str().to_string(), name.clone());
        }
        map
    }
}

/// Key-value persistence for the session.
///
/// `set` replaces every entry at once: fields absent from the credentials
/// are removed, never left over from a previous login.
pub trait CredentialStore: Send + Sync {
    fn get(&self, key: StorageKey) -> Result<Option<String>>;

    fn set(&self, credentials: &Credentials) -> Result<()>;

    fn clear(&self) -> Result<()>;

    /// Clear every entry, but only while the stored token equals `token`.
    ///
    /// The comparison and the clear happen under one write lock. Returns
    /// whether anything was cleared.
    fn clear_if_token(&self, token: &str) -> Result<bool>;
}

/// Process-local store, used by tests and embedders that persist elsewhere.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write a single entry directly, bypassing `set`.
    ///
    /// Lets callers reproduce stores left in an inconsistent state.
    pub fn insert_raw(&self, key: StorageKey, value: &str) -> Result<()> {
        let mut entries = self.entries.write().map_err(|_| StoreError::Poisoned)?;
        entries.insert(key.as_str().to_string(), value.to_string());
        Ok(())
    }
}

impl CredentialStore for MemoryStore {
    fn get(&self, key: StorageKey) -> Result<Option<String>> {
        let entries = self.entries.read().map_err(|_| StoreError::Poisoned)?;
        Ok(entries.get(key.as_str()).cloned())
    }

    fn set(&self, credentials: &Credentials) -> Result<()> {
        let mut entries = self.entries.write().map_err(|_| StoreError::Poisoned)?;
        *entries = credentials.entries();
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut entries = self.entries.write().map_err(|_| StoreError::Poisoned)?;
        entries.clear();
        Ok(())
    }

    fn clear_if_token(&self, token: &str) -> Result<bool> {
        let mut entries = self.entries.write().map_err(|_| StoreError::Poisoned)?;
        if entries.get(StorageKey::Token.as_str()).map(String::as_str) != Some(token) {
            return Ok(false);
        }
        entries.clear();
        Ok(true)
    }
}

/// YAML file store that survives restarts.
///
/// Writes go to a sibling temp file that is renamed over the target, so a
/// reader never sees a half-written session.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(StoreError::Read(e.to_string()).into()),
        };

        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_yaml::from_str(&contents).map_err(|e| StoreError::Parse(e.to_string()).into())
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::Write(e.to_string()))?;
        }

        let contents =
            serde_yaml::to_string(entries).map_err(|e| StoreError::Write(e.to_string()))?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        write_private(&tmp, contents.as_bytes()).map_err(|e| StoreError::Write(e.to_string()))?;

        std::fs::rename(&tmp, &self.path).map_err(|e| StoreError::Write(e.to_string()))?;
        Ok(())
    }

    fn remove(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Write(e.to_string()).into()),
        }
    }
}

/// Write `contents` to a file that is owner-only from the moment it exists.
fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);

    // Set file permissions to 600 on Unix systems
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;

    // An existing temp file keeps its old mode; tighten it as well
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    }

    file.write_all(contents)?;
    file.sync_all()
}

impl CredentialStore for FileStore {
    fn get(&self, key: StorageKey) -> Result<Option<String>> {
        let mut entries = self.read_entries()?;
        Ok(entries.remove(key.as_str()))
    }

    fn set(&self, credentials: &Credentials) -> Result<()> {
        let _guard = self.write_lock.lock().map_err(|_| StoreError::Poisoned)?;
        self.write_entries(&credentials.entries())
    }

    fn clear(&self) -> Result<()> {
        let _guard = self.write_lock.lock().map_err(|_| StoreError::Poisoned)?;
        self.remove()
    }

    fn clear_if_token(&self, token: &str) -> Result<bool> {
        let _guard = self.write_lock.lock().map_err(|_| StoreError::Poisoned)?;
        let entries = self.read_entries()?;
        if entries.get(StorageKey::Token.as_str()).map(String::as_str) != Some(token) {
            return Ok(false);
        }
        self.remove()?;
        Ok(true)
    }
}
