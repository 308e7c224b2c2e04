// Copyright (c) 2018 Blackfynn, Inc. All Rights Reserved.

//! Session storage.
//!
//! The client never touches session storage directly; it reads and writes the
//! session through a `SessionStore` supplied at construction time.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use serde_json;

use gym;
use gym::model::Session;

/// Storage for the session of the logged-in user.
///
/// Every value of the session (both tokens and both identifiers) is written
/// and cleared together.
pub trait SessionStore: Send + Sync {
    /// Returns the stored session, if any.
    fn get(&self) -> gym::Result<Option<Session>>;

    /// Replaces the stored session.
    fn set(&self, session: &Session) -> gym::Result<()>;

    /// Removes the stored session.
    fn clear(&self) -> gym::Result<()>;
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// A session store living in process memory.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    session: Mutex<Option<Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Default::default()
    }

    /// A store pre-populated with `session`.
    pub fn with_session(session: Session) -> Self {
        Self {
            session: Mutex::new(Some(session)),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> gym::Result<Option<Session>> {
        Ok(lock(&self.session).clone())
    }

    fn set(&self, session: &Session) -> gym::Result<()> {
        *lock(&self.session) = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> gym::Result<()> {
        *lock(&self.session) = None;
        Ok(())
    }
}

/// A session store persisting the session as a JSON document on disk, so a
/// session survives process restarts.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    // Serializes access from clones of the client within this process.
    guard: Mutex<()>,
}

impl FileSessionStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            guard: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        self.path.as_path()
    }

    fn staging_path(&self) -> PathBuf {
        let mut staging = self.path.clone().into_os_string();
        staging.push(".tmp");
        PathBuf::from(staging)
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self) -> gym::Result<Option<Session>> {
        let _guard = lock(&self.guard);
        let contents = match fs::read(&self.path) {
            Ok(contents) => contents,
            Err(ref e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        serde_json::from_slice(&contents).map(Some).map_err(|e| {
            gym::Error::with_chain(
                e,
                format!("gym:session:read<{path}>", path = self.path.display()),
            )
        })
    }

    fn set(&self, session: &Session) -> gym::Result<()> {
        let _guard = lock(&self.guard);
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        // Write then rename, so a crash never leaves a half-written session:
        let staging = self.staging_path();
        fs::write(&staging, serde_json::to_vec(session)?)?;
        fs::rename(&staging, &self.path)?;
        Ok(())
    }

    fn clear(&self) -> gym::Result<()> {
        let _guard = lock(&self.guard);
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(ref e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
