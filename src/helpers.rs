//! Filesystem, environment, and display helpers.
//!
//! Everything here absorbs its own failures: the return value is a boolean or
//! an `Option`, and the underlying error goes to a `tracing` diagnostic
//! instead of propagating.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{info, warn};

use crate::types::Message;

/// Characters of a credential revealed by [`check_api_key`]. The reveal is
/// intentional, for operator sanity-checking; the remainder is never logged.
pub const KEY_PREFIX_LEN: usize = 8;

/// Characters of message content shown per line by [`format_messages`].
pub const DISPLAY_TRUNCATE_LEN: usize = 100;

/// Load `KEY=value` pairs from a dotenv-style file into the process
/// environment, overriding variables that are already set.
///
/// A missing or unreadable file returns `false`; nothing panics.
pub fn load_env_file(path: impl AsRef<Path>) -> bool {
    let path = path.as_ref();
    match dotenvy::from_path_override(path) {
        Ok(()) => true,
        Err(err) => {
            warn!("could not load env file {}: {err}", path.display());
            false
        }
    }
}

/// Whether the named environment variable holds a non-blank value.
///
/// When it does, an info-level diagnostic shows the first [`KEY_PREFIX_LEN`]
/// characters so an operator can confirm the right key is loaded.
pub fn check_api_key(name: &str) -> bool {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => {
            let prefix: String = value.chars().take(KEY_PREFIX_LEN).collect();
            info!("{name} exists and begins with {prefix}...");
            true
        }
        _ => {
            info!("{name} not set");
            false
        }
    }
}

/// Write `value` to `path` as pretty-printed JSON (2-space indentation,
/// non-ASCII text kept as UTF-8 rather than escaped).
pub fn save_json<T: Serialize>(value: &T, path: impl AsRef<Path>) -> bool {
    let path = path.as_ref();
    let serialized = match serde_json::to_string_pretty(value) {
        Ok(serialized) => serialized,
        Err(err) => {
            warn!("could not serialize JSON for {}: {err}", path.display());
            return false;
        }
    };
    match fs::write(path, serialized) {
        Ok(()) => true,
        Err(err) => {
            warn!("could not write {}: {err}", path.display());
            false
        }
    }
}

/// Read and deserialize a JSON file. `None` on any read or parse error.
pub fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Option<T> {
    let path = path.as_ref();
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) => {
            warn!("could not read {}: {err}", path.display());
            return None;
        }
    };
    match serde_json::from_str(&contents) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!("could not parse {}: {err}", path.display());
            None
        }
    }
}

/// Create a directory and any missing ancestors. Succeeds if it already
/// exists.
pub fn ensure_directory(path: impl AsRef<Path>) -> bool {
    let path = path.as_ref();
    match fs::create_dir_all(path) {
        Ok(()) => true,
        Err(err) => {
            warn!("could not create directory {}: {err}", path.display());
            false
        }
    }
}

/// Render a conversation one numbered line per message: 1-based index, role
/// upper-cased, content clipped to [`DISPLAY_TRUNCATE_LEN`] characters with a
/// trailing `...` when clipped. Clipping counts `char`s, so multi-byte text
/// never splits mid-character.
pub fn format_messages(messages: &[Message]) -> String {
    messages
        .iter()
        .enumerate()
        .map(|(i, message)| {
            let role = message.role.as_str().to_uppercase();
            let clipped: String = message.content.chars().take(DISPLAY_TRUNCATE_LEN).collect();
            let ellipsis = if message.content.chars().count() > DISPLAY_TRUNCATE_LEN {
                "..."
            } else {
                ""
            };
            format!("{}. {role}: {clipped}{ellipsis}", i + 1)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use tempfile::tempdir;

    #[test]
    fn test_json_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.json");
        let value = json!({
            "name": "café ☕",
            "nested": {"numbers": [1, 2.5, -3], "flag": true},
            "items": ["a", "b", null]
        });

        assert!(save_json(&value, &path));
        let loaded: Value = load_json(&path).unwrap();
        assert_eq!(loaded, value);

        // 2-space indentation, UTF-8 left unescaped.
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("café ☕"));
        assert!(raw.contains("  \"name\""));
    }

    #[test]
    fn test_load_json_missing_file() {
        let dir = tempdir().unwrap();
        let missing: Option<Value> = load_json(dir.path().join("nope.json"));
        assert!(missing.is_none());
    }

    #[test]
    fn test_load_json_invalid_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{not json").unwrap();
        let loaded: Option<Value> = load_json(&path);
        assert!(loaded.is_none());
    }

    #[test]
    fn test_save_json_to_missing_directory() {
        let dir = tempdir().unwrap();
        assert!(!save_json(&json!(1), dir.path().join("absent").join("x.json")));
    }

    #[test]
    fn test_ensure_directory_idempotent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a").join("b").join("c");
        assert!(ensure_directory(&path));
        assert!(ensure_directory(&path));
        assert!(path.is_dir());
    }

    #[test]
    fn test_format_messages_basic() {
        let messages = vec![Message::user("Hello"), Message::assistant("Hi there!")];
        let formatted = format_messages(&messages);
        let lines: Vec<&str> = formatted.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "1. USER: Hello");
        assert_eq!(lines[1], "2. ASSISTANT: Hi there!");
    }

    #[test]
    fn test_format_messages_truncates_long_content() {
        let long = "x".repeat(150);
        let formatted = format_messages(&[Message::user(&long)]);
        assert_eq!(formatted, format!("1. USER: {}...", "x".repeat(100)));
    }

    #[test]
    fn test_format_messages_exact_limit_not_truncated() {
        let exact = "y".repeat(DISPLAY_TRUNCATE_LEN);
        let formatted = format_messages(&[Message::system(&exact)]);
        assert_eq!(formatted, format!("1. SYSTEM: {exact}"));
    }

    #[test]
    fn test_format_messages_multibyte_content() {
        let content = "é".repeat(120);
        let formatted = format_messages(&[Message::user(&content)]);
        assert_eq!(formatted, format!("1. USER: {}...", "é".repeat(100)));
    }

    #[test]
    fn test_check_api_key_states() {
        std::env::remove_var("OPENROUTER_UTILS_TEST_UNSET");
        assert!(!check_api_key("OPENROUTER_UTILS_TEST_UNSET"));

        std::env::set_var("OPENROUTER_UTILS_TEST_BLANK", "   ");
        assert!(!check_api_key("OPENROUTER_UTILS_TEST_BLANK"));
        std::env::remove_var("OPENROUTER_UTILS_TEST_BLANK");

        std::env::set_var("OPENROUTER_UTILS_TEST_SET", "sk-or-v1-abcdef");
        assert!(check_api_key("OPENROUTER_UTILS_TEST_SET"));
        std::env::remove_var("OPENROUTER_UTILS_TEST_SET");
    }

    #[test]
    fn test_load_env_file_overrides_existing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "OPENROUTER_UTILS_TEST_ENVFILE=from_file\n").unwrap();

        std::env::set_var("OPENROUTER_UTILS_TEST_ENVFILE", "stale");
        assert!(load_env_file(&path));
        assert_eq!(
            std::env::var("OPENROUTER_UTILS_TEST_ENVFILE").as_deref(),
            Ok("from_file")
        );
        std::env::remove_var("OPENROUTER_UTILS_TEST_ENVFILE");
    }

    #[test]
    fn test_load_env_file_missing() {
        let dir = tempdir().unwrap();
        assert!(!load_env_file(dir.path().join("absent.env")));
    }
}
