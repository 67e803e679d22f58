//! Global settings loaded from TOML.
//!
//! - `init_custom(toml_content)` sets a custom TOML before first `settings()` call
//! - `settings()` returns `&'static Settings` (lazy-init singleton)
//! - Default values are embedded via `include_str!("default_settings.toml")`

use std::sync::OnceLock;

use serde::Deserialize;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Set custom TOML before first `settings()` call.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Get or initialize the global settings singleton.
///
/// A custom TOML has already been validated by `init_custom`.
pub fn settings() -> &'static Settings {
    static INSTANCE: OnceLock<Settings> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_SETTINGS_TOML);
        parse_settings_toml(toml_str).expect("settings TOML must be valid")
    })
}

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub normalize: NormalizeSettings,
    pub punctuation: PunctuationSettings,
    pub batch: BatchSettings,
    pub docx: DocxSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NormalizeSettings {
    pub strip_zero_width: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PunctuationSettings {
    pub map_context_punctuation: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BatchSettings {
    pub workers: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DocxSettings {
    pub font_name: String,
    pub max_input_bytes: u64,
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    macro_rules! check_positive {
        ($section:ident . $field:ident) => {
            if s.$section.$field == 0 {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must be positive".to_string(),
                });
            }
        };
    }

    check_positive!(batch.workers);
    check_positive!(docx.max_input_bytes);

    if s.docx.font_name.trim().is_empty() {
        return Err(SettingsError::InvalidValue {
            field: "docx.font_name".to_string(),
            reason: "must not be empty".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_default_toml() {
        let s = parse_settings_toml(DEFAULT_SETTINGS_TOML).unwrap();
        assert!(s.normalize.strip_zero_width);
        assert!(!s.punctuation.map_context_punctuation);
        assert_eq!(s.batch.workers, 4);
        assert_eq!(s.docx.font_name, "Kruti Dev 010");
        assert_eq!(s.docx.max_input_bytes, 52_428_800);
    }

    #[test]
    fn global_settings_are_the_embedded_defaults() {
        // No test installs a custom TOML.
        let s = settings();
        assert!(s.normalize.strip_zero_width);
        assert_eq!(s.batch.workers, 4);
        assert_eq!(s.docx.font_name, "Kruti Dev 010");
    }

    #[test]
    fn parse_valid_custom_toml() {
        let toml = r#"
[normalize]
strip_zero_width = false

[punctuation]
map_context_punctuation = true

[batch]
workers = 8

[docx]
font_name = "Kruti Dev 011"
max_input_bytes = 1024
"#;
        let s = parse_settings_toml(toml).unwrap();
        assert!(!s.normalize.strip_zero_width);
        assert!(s.punctuation.map_context_punctuation);
        assert_eq!(s.batch.workers, 8);
        assert_eq!(s.docx.font_name, "Kruti Dev 011");
    }

    #[test]
    fn error_zero_workers() {
        let toml = r#"
[normalize]
strip_zero_width = true

[punctuation]
map_context_punctuation = false

[batch]
workers = 0

[docx]
font_name = "Kruti Dev 010"
max_input_bytes = 1024
"#;
        let err = parse_settings_toml(toml).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidValue { .. }));
        assert!(err.to_string().contains("batch.workers"));
    }

    #[test]
    fn error_empty_font_name() {
        let toml = r#"
[normalize]
strip_zero_width = true

[punctuation]
map_context_punctuation = false

[batch]
workers = 2

[docx]
font_name = "  "
max_input_bytes = 1024
"#;
        let err = parse_settings_toml(toml).unwrap_err();
        assert!(err.to_string().contains("docx.font_name"));
    }

    #[test]
    fn error_invalid_toml() {
        let err = parse_settings_toml("not valid toml {{{").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn error_missing_section() {
        let toml = r#"
[normalize]
strip_zero_width = true
"#;
        let err = parse_settings_toml(toml).unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }
}
