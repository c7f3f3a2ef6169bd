//! Roku remote-control key names.

use crate::errors::CaptureError;

/// Key names the Roku remote endpoint accepts, in their canonical spelling.
pub const SUPPORTED_KEYS: [&str; 15] = [
    "Home",
    "Rev",
    "Fwd",
    "Play",
    "Select",
    "Left",
    "Right",
    "Down",
    "Up",
    "Back",
    "InstantReplay",
    "Info",
    "Backspace",
    "Search",
    "Enter",
];

/// Uppercase only the first character of `raw`; every other character is
/// left exactly as typed. This is the matching rule the remote endpoint
/// expects, not a general title-case: `instantreplay` normalizes to
/// `Instantreplay`, which is not a supported key.
pub fn normalize_key(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Normalize `raw` and match it against [`SUPPORTED_KEYS`].
pub fn validate_key(raw: &str) -> Result<&'static str, CaptureError> {
    let normalized = normalize_key(raw);
    SUPPORTED_KEYS
        .iter()
        .find(|key| **key == normalized)
        .copied()
        .ok_or(CaptureError::InvalidKey { key: normalized })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_only_the_first_character() {
        assert_eq!(normalize_key("home"), "Home");
        assert_eq!(normalize_key("Home"), "Home");
        assert_eq!(normalize_key("instantReplay"), "InstantReplay");
        assert_eq!(normalize_key("instantreplay"), "Instantreplay");
        assert_eq!(normalize_key("HOME"), "HOME");
        assert_eq!(normalize_key(""), "");
    }

    #[test]
    fn accepts_every_supported_key() {
        for key in SUPPORTED_KEYS {
            assert_eq!(validate_key(key).unwrap(), key);
        }
    }

    #[test]
    fn accepts_lowercased_first_letter() {
        assert_eq!(validate_key("select").unwrap(), "Select");
        assert_eq!(validate_key("instantReplay").unwrap(), "InstantReplay");
    }

    #[test]
    fn rejects_tokens_outside_the_allow_list() {
        for raw in ["instantreplay", "HOME", "Volume", "left arrow", ""] {
            match validate_key(raw) {
                Err(CaptureError::InvalidKey { key }) => {
                    assert_eq!(key, normalize_key(raw));
                }
                other => panic!("expected InvalidKey for {raw:?}, got {other:?}"),
            }
        }
    }
}
