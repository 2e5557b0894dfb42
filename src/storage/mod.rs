// storage/mod.rs
// Persistence for the rule table and the journals

mod backend;

pub use backend::{FileBackend, MemoryBackend, PersistenceBackend};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::config::JSON_INDENT;
use crate::error_handling::StorageError;

/// Loads a JSON list from a backend. An empty store reads as an empty list.
pub(crate) fn load_list<T: DeserializeOwned>(
    backend: &dyn PersistenceBackend,
) -> Result<Vec<T>, StorageError> {
    match backend.load()? {
        Some(contents) if !contents.trim().is_empty() => serde_json::from_str(&contents)
            .map_err(|source| StorageError::Json {
                location: backend.location(),
                source,
            }),
        _ => Ok(Vec::new()),
    }
}

/// Serializes `items` and replaces the backend contents with them.
pub(crate) fn flush_list<T: Serialize>(
    backend: &dyn PersistenceBackend,
    items: &[T],
) -> Result<(), StorageError> {
    let contents = to_indented_json(items).map_err(|source| StorageError::Json {
        location: backend.location(),
        source,
    })?;
    backend.flush(&contents)
}

fn to_indented_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(JSON_INDENT));
    value.serialize(&mut serializer)?;
    // serde_json only ever writes valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Item {
        url: String,
    }

    #[test]
    fn test_load_list_empty_store() {
        let backend = MemoryBackend::new("empty");
        let items: Vec<Item> = load_list(&backend).expect("load");
        assert!(items.is_empty());
    }

    #[test]
    fn test_load_list_blank_file_reads_as_empty() {
        let backend = MemoryBackend::with_contents("blank", "  \n");
        let items: Vec<Item> = load_list(&backend).expect("load");
        assert!(items.is_empty());
    }

    #[test]
    fn test_load_list_invalid_json() {
        let backend = MemoryBackend::with_contents("broken", "{ invalid json }");
        let result: Result<Vec<Item>, _> = load_list(&backend);
        match result {
            Err(StorageError::Json { location, .. }) => assert_eq!(location, "memory:broken"),
            other => panic!("Expected JSON error, got {:?}", other),
        }
    }

    #[test]
    fn test_flush_list_uses_four_space_indent() {
        let backend = MemoryBackend::new("out");
        flush_list(
            &backend,
            &[Item {
                url: "https://example.com".to_string(),
            }],
        )
        .expect("flush");

        let contents = backend.contents().expect("contents written");
        assert_eq!(
            contents,
            "[\n    {\n        \"url\": \"https://example.com\"\n    }\n]"
        );
        let reloaded: Vec<Item> = load_list(&backend).expect("reload");
        assert_eq!(reloaded[0].url, "https://example.com");
    }
}
