use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};

use crate::errors::BookError;
use crate::logging::DEFAULT_LEVEL;
use crate::store::StorageFormat;

pub const APP_NAME: &str = "expense-book";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BookConfig {
    pub currency: String,
    pub decimal_sep: char,
    /// `""` in the TOML file turns grouping off.
    #[serde(deserialize_with = "optional_char")]
    pub thousands_sep: Option<char>,
    pub fraction_digits: u32,
    pub date_format: String,
    pub data_dir: Option<PathBuf>,
    pub format: StorageFormat,
    pub log_level: String,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            currency: "¥".to_string(),
            decimal_sep: '.',
            thousands_sep: Some(','),
            fraction_digits: 0,
            date_format: "%Y/%m/%d".to_string(),
            data_dir: None,
            format: StorageFormat::Json,
            log_level: DEFAULT_LEVEL.to_string(),
        }
    }
}

impl BookConfig {
    pub fn from_toml(s: &str) -> Result<Self, BookError> {
        Ok(toml::from_str(s)?)
    }

    /// Reads the config at `explicit`, or the per-user default location.
    ///
    /// Only the default location may be missing; that yields the built-in
    /// defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, BookError> {
        let path = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(BookError::InvalidArgument(format!(
                        "No config file found at {}",
                        path.display()
                    )));
                }
                path.to_path_buf()
            }
            None => match default_config_path() {
                Some(path) if path.exists() => path,
                _ => {
                    log::debug!("no config file found, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        log::debug!("config file found at {}", path.display());
        let config = std::fs::read_to_string(&path)?;
        Self::from_toml(&config)
    }

    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(default_data_dir)
    }
}

fn optional_char<'de, D>(deserializer: D) -> Result<Option<char>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (None, _) => Ok(None),
        (Some(c), None) => Ok(Some(c)),
        _ => Err(serde::de::Error::custom(format!(
            "expected a single character or \"\", got \"{s}\""
        ))),
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_NAME).join(CONFIG_FILE))
}

pub fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(BookConfig::from_toml("").unwrap(), BookConfig::default());
    }

    #[test]
    fn partial_file_overrides_fields() {
        let config = BookConfig::from_toml(
            r#"
currency = "€"
decimal_sep = ","
thousands_sep = "."
fraction_digits = 2
format = "msgpack"
data_dir = "/tmp/book"
"#,
        )
        .unwrap();
        assert_eq!(config.currency, "€");
        assert_eq!(config.decimal_sep, ',');
        assert_eq!(config.thousands_sep, Some('.'));
        assert_eq!(config.fraction_digits, 2);
        assert_eq!(config.format, StorageFormat::Msgpack);
        assert_eq!(config.data_dir(), PathBuf::from("/tmp/book"));
        assert_eq!(config.date_format, "%Y/%m/%d");
    }

    #[test]
    fn empty_thousands_separator_disables_grouping() {
        let config = BookConfig::from_toml("thousands_sep = \"\"").unwrap();
        assert_eq!(config.thousands_sep, None);
        let config = BookConfig::from_toml("thousands_sep = \"'\"").unwrap();
        assert_eq!(config.thousands_sep, Some('\''));
        assert!(matches!(
            BookConfig::from_toml("thousands_sep = \"ab\""),
            Err(BookError::Config(_))
        ));
    }

    #[test]
    fn unknown_format_is_rejected() {
        assert!(matches!(
            BookConfig::from_toml("format = \"xml\""),
            Err(BookError::Config(_))
        ));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let missing = Path::new("/definitely/not/here/config.toml");
        assert!(matches!(
            BookConfig::load(Some(missing)),
            Err(BookError::InvalidArgument(_))
        ));
    }
}
