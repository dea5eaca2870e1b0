//! Configuration loaders covering the success and failure paths.

use std::ffi::OsString;
use std::fs;
use std::num::NonZeroU32;

use camino::Utf8PathBuf;
use ortho_config::OrthoConfig;
use tempfile::TempDir;
use windiafaq_config::{Config, ConfigResult};

use crate::bootstrap::ConfigLoader;

const TEST_SAMPLES: u32 = 25;

/// Loader that backs the FAQ store with a file in a temporary directory.
pub struct TestConfigLoader {
    store_dir: TempDir,
}

impl TestConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        let store_dir = TempDir::new().expect("failed to create temporary directory for FAQ store");
        Self { store_dir }
    }

    /// Location of the FAQ document the daemon will use.
    #[must_use]
    pub fn store_path(&self) -> Utf8PathBuf {
        let path = self.store_dir.path().join("faq.json");
        Utf8PathBuf::from_path_buf(path).expect("temporary store path was not valid UTF-8")
    }
}

impl ConfigLoader for TestConfigLoader {
    fn load(&self) -> ConfigResult {
        Ok(Config {
            faq_store: Some(self.store_path()),
            ees_samples: NonZeroU32::new(TEST_SAMPLES).expect("sample count is non-zero"),
            log_filter: "warn".to_owned(),
            ..Config::default()
        })
    }
}

/// Loader that intentionally fails by passing an unsupported endpoint.
pub struct FailingConfigLoader;

impl ConfigLoader for FailingConfigLoader {
    fn load(&self) -> ConfigResult {
        let args = vec![
            OsString::from("windiafaqd"),
            OsString::from("--ipc-endpoint"),
            OsString::from("udp://127.0.0.1:5555"),
        ];
        Config::load_from_iter(args)
    }
}

/// Loader whose FAQ store file exists but is not a FAQ document.
pub struct CorruptStoreLoader {
    inner: TestConfigLoader,
}

impl CorruptStoreLoader {
    #[must_use]
    pub fn new() -> Self {
        let inner = TestConfigLoader::new();
        fs::write(inner.store_path(), "{\"commands\": 7").expect("write corrupt FAQ store");
        Self { inner }
    }
}

impl ConfigLoader for CorruptStoreLoader {
    fn load(&self) -> ConfigResult {
        self.inner.load()
    }
}
