//! File-backed registry access under an advisory lock.

use std::{
    fs,
    path::{Path, PathBuf},
};

use fs2::FileExt;

use super::{Registry, RegistryError};

/// Owner of one `static.json` file.
///
/// Every mutation is a full read-modify-write performed while holding an
/// exclusive lock on `<registry>.lock`, so concurrent `add`/`compile`
/// invocations cannot lose each other's updates.
#[derive(Debug, Clone)]
pub struct RegistryStore {
    path: PathBuf,
}

impl RegistryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".lock");
        PathBuf::from(name)
    }

    /// Run `f` while holding the registry lock.
    fn locked<T>(
        &self,
        f: impl FnOnce() -> Result<T, RegistryError>,
    ) -> Result<T, RegistryError> {
        let lock_path = self.lock_path();
        let lock_file =
            fs::File::create(&lock_path).map_err(|e| RegistryError::Io(lock_path.clone(), e))?;
        lock_file
            .lock_exclusive()
            .map_err(|e| RegistryError::Io(lock_path.clone(), e))?;

        let result = f();

        let _ = lock_file.unlock();
        result
    }

    pub fn load(&self) -> Result<Registry, RegistryError> {
        Registry::load(&self.path)
    }

    /// Write a fresh registry, replacing any existing file.
    pub fn create(&self, registry: &Registry) -> Result<(), RegistryError> {
        self.locked(|| registry.save(&self.path))
    }

    /// Read-modify-write the registry.
    ///
    /// The file is rewritten only when `f` actually changed something.
    pub fn update<T>(
        &self,
        f: impl FnOnce(&mut Registry) -> Result<T, RegistryError>,
    ) -> Result<T, RegistryError> {
        self.locked(|| {
            let mut registry = Registry::load(&self.path)?;
            let before = registry.clone();
            let value = f(&mut registry)?;
            if registry != before {
                registry.save(&self.path)?;
            }
            Ok(value)
        })
    }

    /// Append a page. `Ok(false)` when it was already registered.
    pub fn add_page(&self, name: &str) -> Result<bool, RegistryError> {
        self.update(|reg| Ok(reg.add_page(name)?))
    }

    pub fn set_project_name(&self, name: &str) -> Result<(), RegistryError> {
        self.update(|reg| {
            reg.set_project_name(name);
            Ok(())
        })
    }

    pub fn mark_tidied(&self) -> Result<(), RegistryError> {
        self.update(|reg| {
            reg.mark_tidied();
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{sync::Arc, thread};
    use tempfile::TempDir;

    fn setup() -> (TempDir, RegistryStore) {
        let dir = TempDir::new().unwrap();
        let store = RegistryStore::new(dir.path().join("static.json"));
        store.create(&Registry::new("demo")).unwrap();
        (dir, store)
    }

    #[test]
    fn test_lock_file_name() {
        let store = RegistryStore::new("/project/static.json");
        assert_eq!(store.lock_path(), PathBuf::from("/project/static.json.lock"));
    }

    #[test]
    fn test_update_persists() {
        let (_dir, store) = setup();
        assert!(store.add_page("home").unwrap());
        assert!(!store.add_page("home").unwrap());
        store.set_project_name("renamed").unwrap();
        store.mark_tidied().unwrap();

        let reg = store.load().unwrap();
        assert_eq!(reg.project_name(), "renamed");
        assert!(reg.is_tidied());
        assert_eq!(reg.raw_pages(), &["", "home"]);
    }

    #[test]
    fn test_update_without_change_keeps_file() {
        let (_dir, store) = setup();
        store.add_page("home").unwrap();
        let before = fs::metadata(store.path()).unwrap().modified().unwrap();

        thread::sleep(std::time::Duration::from_millis(20));
        assert!(!store.add_page("home").unwrap());

        let after = fs::metadata(store.path()).unwrap().modified().unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_invalid_page_leaves_file_untouched() {
        let (_dir, store) = setup();
        let err = store.add_page("bad/name").unwrap_err();
        assert!(matches!(err, RegistryError::Page(_)));
        assert_eq!(store.load().unwrap().raw_pages(), &[""]);
    }

    #[test]
    fn test_concurrent_adds_are_not_lost() {
        let (_dir, store) = setup();
        let store = Arc::new(store);

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                thread::spawn(move || store.add_page(&format!("page{i}")).unwrap())
            })
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap());
        }

        assert_eq!(store.load().unwrap().pages().count(), 8);
    }

    #[test]
    fn test_update_missing_registry() {
        let dir = TempDir::new().unwrap();
        let store = RegistryStore::new(dir.path().join("static.json"));
        assert!(matches!(
            store.add_page("home"),
            Err(RegistryError::NotFound(_))
        ));
    }
}
