//! 브라우저 localStorage 저장소

use policy_review_common::preferences::{KeyValue, KvPreferenceStore};
use policy_review_common::{Error, Result};
use web_sys::Storage;

/// 서버 주소 (설정 패널)
pub const KEY_SERVER_URL: &str = "serverUrl";

/// localStorage를 KeyValue로 감싼 것. 저장소를 쓸 수 없으면 (사생활 보호 모드 등)
/// 읽기는 빈 값, 쓰기는 무시한다.
pub struct LocalStorage {
    storage: Option<Storage>,
}

impl LocalStorage {
    pub fn open() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        Self { storage }
    }
}

impl KeyValue for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if let Some(storage) = &self.storage {
            storage
                .set_item(key, value)
                .map_err(|e| Error::Config(format!("localStorage 쓰기 실패: {:?}", e)))?;
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        if let Some(storage) = &self.storage {
            storage
                .remove_item(key)
                .map_err(|e| Error::Config(format!("localStorage 삭제 실패: {:?}", e)))?;
        }
        Ok(())
    }
}

pub fn preference_store() -> KvPreferenceStore<LocalStorage> {
    KvPreferenceStore::new(LocalStorage::open())
}

pub fn load_server_url() -> String {
    LocalStorage::open().get(KEY_SERVER_URL).unwrap_or_default()
}

pub fn save_server_url(url: &str) {
    let storage = LocalStorage::open();
    let result = if url.trim().is_empty() {
        storage.remove(KEY_SERVER_URL)
    } else {
        storage.set(KEY_SERVER_URL, url.trim())
    };
    if let Err(e) = result {
        web_sys::console::warn_1(&e.to_string().into());
    }
}

/// <html> 요소의 dark 클래스 전환
pub fn apply_dark_mode(enabled: bool) {
    let root = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element());
    if let Some(root) = root {
        let _ = root.class_list().toggle_with_force("dark", enabled);
    }
}
