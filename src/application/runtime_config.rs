use std::path::PathBuf;

use crate::application::data::ColorMode;
use crate::cli::Cli;
use crate::config::Settings;

const DEFAULT_CONTEXT: usize = 1;

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub commit: String,
    pub context: usize,
    pub color: ColorMode,
    pub root: PathBuf,
}

impl RuntimeConfig {
    /// Flags win over the settings file, which wins over built-in defaults.
    pub fn resolve(cli: Cli, settings: Settings) -> Self {
        Self {
            commit: cli.commit,
            context: cli.context.or(settings.context).unwrap_or(DEFAULT_CONTEXT),
            color: cli.color.or(settings.color).unwrap_or_default(),
            root: cli.root,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("git-context-tree").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn falls_back_to_defaults() {
        let config = RuntimeConfig::resolve(cli(&["HEAD"]), Settings::default());

        assert_eq!(config.commit, "HEAD");
        assert_eq!(config.context, DEFAULT_CONTEXT);
        assert_eq!(config.color, ColorMode::Auto);
        assert_eq!(config.root, PathBuf::from("."));
    }

    #[test]
    fn settings_fill_in_missing_flags() {
        let settings = Settings {
            context: Some(4),
            color: Some(ColorMode::Never),
        };

        let config = RuntimeConfig::resolve(cli(&["HEAD"]), settings);

        assert_eq!(config.context, 4);
        assert_eq!(config.color, ColorMode::Never);
    }

    #[test]
    fn flags_override_settings() {
        let settings = Settings {
            context: Some(4),
            color: Some(ColorMode::Never),
        };

        let config =
            RuntimeConfig::resolve(cli(&["-c", "0", "--color", "always", "HEAD"]), settings);

        assert_eq!(config.context, 0);
        assert_eq!(config.color, ColorMode::Always);
    }
}
