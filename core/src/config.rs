//! Backend selection from the environment.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::client::TodoClient;
use crate::http::UreqTransport;
use crate::storage::FileStorage;
use crate::store::{LocalStore, RemoteStore, Store};

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const BASE_URL_VAR: &str = "TODO_API_BASE_URL";
pub const STORAGE_DIR_VAR: &str = "TODO_STORAGE_DIR";

/// Which persistence variant backs the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum TodoConfig {
    Remote { base_url: String },
    Local { storage_dir: PathBuf },
}

impl Default for TodoConfig {
    fn default() -> Self {
        TodoConfig::Remote {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl TodoConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// A storage directory wins over a base URL; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(dir) = var(STORAGE_DIR_VAR) {
            return TodoConfig::Local {
                storage_dir: PathBuf::from(dir),
            };
        }
        match var(BASE_URL_VAR) {
            Some(base_url) => TodoConfig::Remote { base_url },
            None => TodoConfig::default(),
        }
    }

    /// Build the configured store. It still needs `load()`.
    pub fn open(&self) -> Box<dyn Store> {
        match self {
            TodoConfig::Remote { base_url } => {
                tracing::info!(%base_url, "using remote todo store");
                Box::new(RemoteStore::new(
                    TodoClient::new(base_url),
                    UreqTransport::new(),
                ))
            }
            TodoConfig::Local { storage_dir } => {
                tracing::info!(dir = %storage_dir.display(), "using local todo store");
                Box::new(LocalStore::new(FileStorage::new(storage_dir.clone())))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_to_local_api_server() {
        assert_eq!(TodoConfig::from_lookup(lookup(&[])), TodoConfig::default());
        assert_eq!(
            TodoConfig::from_lookup(lookup(&[(BASE_URL_VAR, "  ")])),
            TodoConfig::Remote {
                base_url: DEFAULT_BASE_URL.to_string()
            }
        );
    }

    #[test]
    fn storage_dir_selects_local_variant() {
        let config = TodoConfig::from_lookup(lookup(&[
            (BASE_URL_VAR, "https://api.example.com"),
            (STORAGE_DIR_VAR, "/tmp/todos"),
        ]));
        assert_eq!(
            config,
            TodoConfig::Local {
                storage_dir: PathBuf::from("/tmp/todos")
            }
        );
    }

    #[test]
    fn deserializes_tagged_backend() {
        let config: TodoConfig =
            serde_json::from_str(r#"{"backend":"remote","base_url":"https://api.example.com"}"#)
                .unwrap();
        assert_eq!(
            config,
            TodoConfig::Remote {
                base_url: "https://api.example.com".to_string()
            }
        );
    }

    #[test]
    fn local_store_opens_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = TodoConfig::Local {
            storage_dir: dir.path().to_path_buf(),
        }
        .open();
        assert!(store.load());
        assert!(store.add("from config"));
        assert!(dir.path().join("todos.json").exists());
    }
}
