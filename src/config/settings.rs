use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::string::FromUtf8Error;

use compio::fs;
use hashlink::LinkedHashMap;
use saphyr::{LoadableYamlNode, Scalar, Yaml};
use snafu::prelude::*;
use tracing::debug;

use crate::application::data::ColorMode;

const SETTINGS_FILE_NAME: &str = ".context-tree.yaml";
const CONTEXT_KEY: &str = "context";
const COLOR_KEY: &str = "color";

fn get_settings_file_path(root: &Path) -> PathBuf {
    root.join(SETTINGS_FILE_NAME)
}

/// Per-repository defaults. Command line flags take precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub context: Option<usize>,
    pub color: Option<ColorMode>,
}

impl Settings {
    pub async fn read(root: &Path) -> Result<Self, SettingsError> {
        Self::from_path(get_settings_file_path(root)).await
    }

    /// A missing file yields the defaults; any other read failure is an error.
    pub async fn from_path(path: PathBuf) -> Result<Self, SettingsError> {
        debug!("Reading settings file: {}", path.display());
        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                debug!("No settings file found, using defaults");
                return Ok(Self::default());
            }
            Err(error) => {
                return Err(error).context(ReadSnafu {
                    file_path: path.display().to_string(),
                });
            }
        };

        let contents = String::from_utf8(bytes).context(EncodingSnafu {
            file_path: path.display().to_string(),
        })?;
        contents.as_str().try_into()
    }

    fn parse_settings_from_yaml(
        top_level: &LinkedHashMap<Yaml, Yaml>,
    ) -> Result<Self, SettingsError> {
        let mut settings = Self::default();

        for (key, value) in top_level {
            let Yaml::Value(Scalar::String(name)) = key else {
                debug!("Skipping non-string settings key: {:?}", key);
                continue;
            };

            match &**name {
                CONTEXT_KEY => settings.context = Some(Self::parse_context(value)?),
                COLOR_KEY => settings.color = Some(Self::parse_color(value)?),
                other => debug!("Ignoring unknown setting '{}'", other),
            }
        }

        Ok(settings)
    }

    fn parse_context(value: &Yaml) -> Result<usize, SettingsError> {
        match value {
            Yaml::Value(Scalar::Integer(count)) => usize::try_from(*count).ok(),
            _ => None,
        }
        .context(InvalidContextSnafu {
            value: format!("{value:?}"),
        })
    }

    fn parse_color(value: &Yaml) -> Result<ColorMode, SettingsError> {
        match value {
            Yaml::Value(Scalar::String(mode)) => ColorMode::parse(mode),
            _ => None,
        }
        .context(InvalidColorSnafu {
            value: format!("{value:?}"),
        })
    }
}

impl TryFrom<&str> for Settings {
    type Error = SettingsError;

    fn try_from(contents: &str) -> Result<Self, Self::Error> {
        let documents = Yaml::load_from_str(contents).context(ParseSnafu)?;

        let Some(document) = documents.first() else {
            return Ok(Self::default());
        };
        if let Yaml::Value(Scalar::Null) = document {
            return Ok(Self::default());
        }

        let top_level = document
            .as_mapping()
            .ok_or(SettingsError::TopLevelNotMap)?;

        let settings = Self::parse_settings_from_yaml(top_level)?;
        debug!("Parsed settings: {:?}", settings);
        Ok(settings)
    }
}

#[derive(Debug, Snafu)]
pub enum SettingsError {
    #[snafu(display("Failed to read the settings file: {}", file_path))]
    ReadError {
        file_path: String,
        source: std::io::Error,
    },
    #[snafu(display("Settings file {} is not valid UTF-8", file_path))]
    EncodingError {
        file_path: String,
        source: FromUtf8Error,
    },
    #[snafu(display("Failed to parse the settings file"))]
    ParseError { source: saphyr::ScanError },
    #[snafu(display("Top level of the settings file should be a map"))]
    TopLevelNotMap,
    #[snafu(display("'context' should be a non-negative integer, got {}", value))]
    InvalidContext { value: String },
    #[snafu(display("'color' should be one of auto, always or never, got {}", value))]
    InvalidColor { value: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[compio::test]
    async fn missing_settings_file_yields_defaults() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");

        let settings = Settings::read(temp_dir.path()).await.unwrap();

        assert_eq!(settings, Settings::default());
    }

    #[compio::test]
    async fn settings_file_is_read_from_root() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        std::fs::write(
            temp_dir.path().join(SETTINGS_FILE_NAME),
            "context: 3\ncolor: never\n",
        )
        .expect("Failed to write settings file");

        let settings = Settings::read(temp_dir.path()).await.unwrap();

        assert_eq!(
            settings,
            Settings {
                context: Some(3),
                color: Some(ColorMode::Never),
            }
        );
    }

    #[compio::test]
    async fn directory_in_place_of_settings_file_is_an_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        std::fs::create_dir(temp_dir.path().join(SETTINGS_FILE_NAME))
            .expect("Failed to create directory");

        let result = Settings::read(temp_dir.path()).await;

        assert!(matches!(result, Err(SettingsError::ReadError { .. })));
    }

    #[test]
    fn empty_settings_yield_defaults() {
        let settings: Settings = "".try_into().unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn partial_settings_leave_other_fields_unset() {
        let settings: Settings = "context: 0".try_into().unwrap();
        assert_eq!(settings.context, Some(0));
        assert_eq!(settings.color, None);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let settings: Settings = "color: always\ntheme: dark".try_into().unwrap();
        assert_eq!(settings.color, Some(ColorMode::Always));
    }

    #[test]
    fn invalid_yaml_is_a_parse_error() {
        let result: Result<Settings, _> = "context: [unclosed".try_into();
        assert!(matches!(result, Err(SettingsError::ParseError { .. })));
    }

    #[test]
    fn list_top_level_is_rejected() {
        let result: Result<Settings, _> = "- context\n- color".try_into();
        assert!(matches!(result, Err(SettingsError::TopLevelNotMap)));
    }

    #[test]
    fn negative_context_is_rejected() {
        let result: Result<Settings, _> = "context: -2".try_into();
        assert!(matches!(result, Err(SettingsError::InvalidContext { .. })));
    }

    #[test]
    fn textual_context_is_rejected() {
        let result: Result<Settings, _> = "context: lots".try_into();
        assert!(matches!(result, Err(SettingsError::InvalidContext { .. })));
    }

    #[test]
    fn unknown_color_is_rejected() {
        let result: Result<Settings, _> = "color: rainbow".try_into();
        assert!(matches!(result, Err(SettingsError::InvalidColor { .. })));
    }
}
