/*!
 * Common test utilities for the sitelingo test suite
 */

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use tempfile::TempDir;

use sitelingo::document::Document;
use sitelingo::errors::DocumentError;
use sitelingo::providers::mock::MockBackend;
use sitelingo::storage::MemoryStore;
use sitelingo::{Config, StaticPage, TranslationSession};

/// Route library logs to the test output; safe to call from every test
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Default configuration with a usable credential
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.translation.api_key = "test-key".to_string();
    config
}

/// Default configuration still holding the placeholder key
pub fn unconfigured_config() -> Config {
    Config::default()
}

/// Small Korean page with three language controls
pub fn sample_page() -> StaticPage {
    StaticPage::new("ko")
        .with_element("title", "회사 소개")
        .with_element("welcome", "안녕하세요")
        .with_element("contact", "문의하기")
        .with_fixed_element("brand", "ACME")
        .with_controls(&["ko", "en", "ja"])
}

/// Page with `count` distinct translatable elements
pub fn numbered_page(count: usize) -> StaticPage {
    (0..count).fold(StaticPage::new("ko").with_controls(&["ko", "en"]), |page, i| {
        page.with_element(format!("item-{}", i), format!("항목 {}", i))
    })
}

/// Shared in-memory store
pub fn memory_store() -> Arc<MemoryStore> {
    Arc::new(MemoryStore::new())
}

/// Session over `page` with a mock backend and in-memory store
pub fn session_with(
    config: Config,
    page: StaticPage,
    backend: &MockBackend,
    store: Arc<MemoryStore>,
) -> TranslationSession<StaticPage> {
    TranslationSession::new(config, page, Arc::new(backend.clone()), store)
        .expect("session should open")
}

/// Page whose element `failing_id` rejects every text replacement
pub struct FlakyPage {
    pub page: StaticPage,
    pub failing_id: String,
}

impl FlakyPage {
    pub fn new(page: StaticPage, failing_id: &str) -> Self {
        Self { page, failing_id: failing_id.to_string() }
    }
}

impl Document for FlakyPage {
    fn translatable_elements(&self) -> Vec<String> {
        self.page.translatable_elements()
    }

    fn text(&self, id: &str) -> Result<String, DocumentError> {
        self.page.text(id)
    }

    fn set_text(&mut self, id: &str, text: &str) -> Result<(), DocumentError> {
        if id == self.failing_id {
            return Err(DocumentError::UnknownElement(id.to_string()));
        }
        self.page.set_text(id, text)
    }

    fn language_controls(&self) -> Vec<String> {
        self.page.language_controls()
    }

    fn set_control_active(&mut self, code: &str, active: bool) {
        self.page.set_control_active(code, active);
    }

    fn set_controls_enabled(&mut self, enabled: bool) {
        self.page.set_controls_enabled(enabled);
    }

    fn page_language(&self) -> String {
        self.page.page_language()
    }

    fn set_page_language(&mut self, code: &str) {
        self.page.set_page_language(code);
    }

    fn show_notice(&mut self, message: &str) {
        self.page.show_notice(message);
    }
}
