use serde::{Deserialize, Serialize};

// ===== CONFIG TYPES =====

/// Settings of one data collection, usually loaded from a `[collection]` TOML table.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct CollectionSettings {
    pub version: String,
    /// Optional collection id, prefixed to item ids (`{id}-{key}`)
    pub id: Option<String>,
    /// Keyboard-driven active items are scrolled into view when set
    pub scroll_into_view: Option<ScrollIntoViewOptions>,
    pub text_filter: TextFilterOptions,
}

impl CollectionSettings {
    /// Current settings format version
    pub const CURRENT_VERSION: &'static str = "1.0.0";

    pub fn is_supported_version(&self) -> bool {
        matches!(self.version.as_str(), "1.0.0")
    }

    /// Parse settings from a TOML document.
    ///
    /// Accepts either a bare settings table or a document with a
    /// `[collection]` table; other tables next to `[collection]` are left
    /// alone. Unknown keys and unknown versions are rejected.
    pub fn from_toml_str(source: &str) -> Result<Self, SettingsError> {
        let mut document: toml::Table = toml::from_str(source)?;
        let settings: Self = match document.remove("collection") {
            Some(collection) => collection.try_into()?,
            None => toml::Value::Table(document).try_into()?,
        };
        if !settings.is_supported_version() {
            return Err(SettingsError::UnsupportedVersion(settings.version));
        }
        Ok(settings)
    }

    pub fn to_toml_string(&self) -> Result<String, SettingsError> {
        Ok(toml::to_string(&SettingsDocument { collection: self })?)
    }
}

impl Default for CollectionSettings {
    fn default() -> Self {
        Self {
            version: Self::CURRENT_VERSION.to_string(),
            id: None,
            scroll_into_view: None,
            text_filter: TextFilterOptions::default(),
        }
    }
}

#[derive(Serialize)]
struct SettingsDocument<'a> {
    collection: &'a CollectionSettings,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ScrollIntoViewOptions {
    pub behavior: ScrollBehavior,
    pub mode: ScrollMode,
    pub vertical: ScrollPosition,
    pub horizontal: ScrollPosition,
}

impl Default for ScrollIntoViewOptions {
    fn default() -> Self {
        Self {
            behavior: ScrollBehavior::Smooth,
            mode: ScrollMode::IfNeeded,
            vertical: ScrollPosition::Nearest,
            horizontal: ScrollPosition::Nearest,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ScrollBehavior {
    Auto,
    Smooth,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ScrollMode {
    Always,
    IfNeeded,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ScrollPosition {
    Start,
    Center,
    End,
    Nearest,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct TextFilterOptions {
    pub case_sensitive: bool,
}

// ===== ERRORS =====

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid collection settings: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize collection settings: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("unsupported collection settings version '{0}'")]
    UnsupportedVersion(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let settings = CollectionSettings::from_toml_str("").unwrap();
        assert_eq!(settings, CollectionSettings::default());
        assert!(settings.scroll_into_view.is_none());
        assert!(!settings.text_filter.case_sensitive);
    }

    #[test]
    fn parses_wrapped_collection_table() {
        let settings = CollectionSettings::from_toml_str(
            r#"
            [collection]
            version = "1.0.0"
            id = "persons"

            [collection.scroll_into_view]
            behavior = "auto"
            vertical = "center"

            [collection.text_filter]
            case_sensitive = true
            "#,
        )
        .unwrap();

        assert_eq!(settings.id.as_deref(), Some("persons"));
        let scroll = settings.scroll_into_view.unwrap();
        assert_eq!(scroll.behavior, ScrollBehavior::Auto);
        assert_eq!(scroll.mode, ScrollMode::IfNeeded);
        assert_eq!(scroll.vertical, ScrollPosition::Center);
        assert_eq!(scroll.horizontal, ScrollPosition::Nearest);
        assert!(settings.text_filter.case_sensitive);
    }

    #[test]
    fn rejects_unknown_version() {
        let error = CollectionSettings::from_toml_str("version = \"0.9.0\"").unwrap_err();
        assert!(matches!(error, SettingsError::UnsupportedVersion(v) if v == "0.9.0"));
    }

    #[test]
    fn rejects_malformed_values() {
        let error = CollectionSettings::from_toml_str(
            "[scroll_into_view]\nbehavior = \"instant\"",
        )
        .unwrap_err();
        assert!(matches!(error, SettingsError::Parse(_)));
    }

    #[test]
    fn rejects_malformed_values_inside_collection_table() {
        let error = CollectionSettings::from_toml_str(
            "[collection.scroll_into_view]\nbehavior = \"instant\"\n",
        )
        .unwrap_err();
        assert!(matches!(error, SettingsError::Parse(_)));
    }

    #[test]
    fn rejects_misspelled_keys() {
        let bare = CollectionSettings::from_toml_str("scroll_into_veiw = {}").unwrap_err();
        assert!(matches!(bare, SettingsError::Parse(_)));

        let wrapped =
            CollectionSettings::from_toml_str("[collection.text_filter]\ncase_sensitiv = true").unwrap_err();
        assert!(matches!(wrapped, SettingsError::Parse(_)));
    }

    #[test]
    fn tables_next_to_collection_are_ignored() {
        let settings = CollectionSettings::from_toml_str(
            "[window]\nwidth = 800\n\n[collection]\nid = \"persons\"\n",
        )
        .unwrap();
        assert_eq!(settings.id.as_deref(), Some("persons"));
    }

    #[test]
    fn serialized_settings_load_back() {
        let settings = CollectionSettings {
            id: Some("grid".to_string()),
            scroll_into_view: Some(ScrollIntoViewOptions::default()),
            ..Default::default()
        };
        let text = settings.to_toml_string().unwrap();
        assert_eq!(CollectionSettings::from_toml_str(&text).unwrap(), settings);
    }
}
