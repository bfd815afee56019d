//! Configuration loading helpers for the CLI.
//!
//! Leading arguments destined for `ortho_config` are split off so the loader
//! only receives flags it understands while clap parses the remaining
//! command tokens.

use std::ffi::{OsStr, OsString};

use doclocale_config::Config;
use ortho_config::OrthoConfig;

use crate::errors::AppError;

/// CLI flags recognised by the configuration loader.
///
/// Keep in sync with the fields of [`doclocale_config::Config`].
pub(crate) const CONFIG_CLI_FLAGS: &[&str] = &[
    "--config-path",
    "--site-search-paths",
    "--marker-file",
    "--generated-config",
    "--content-dir",
    "--i18n-dir",
    "--plugin-prefix",
    "--version-dir",
    "--locale-names",
    "--log-filter",
    "--log-format",
];

pub(crate) trait ConfigLoader {
    /// Loads configuration for the CLI.
    ///
    /// Configuration flags must appear before any command tokens; later
    /// occurrences are handed to the command parser instead.
    fn load(&self, args: &[OsString]) -> Result<Config, AppError>;
}

pub(crate) struct OrthoConfigLoader;

impl ConfigLoader for OrthoConfigLoader {
    fn load(&self, args: &[OsString]) -> Result<Config, AppError> {
        Config::load_from_iter(args.iter().cloned()).map_err(AppError::LoadConfiguration)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FlagAction {
    Include { needs_value: bool },
    Skip,
}

fn process_config_flag(argument: &OsStr) -> FlagAction {
    let argument_text = argument.to_string_lossy();
    if !argument_text.starts_with("--") {
        return FlagAction::Skip;
    }

    let (flag, has_inline_value) = match argument_text.split_once('=') {
        Some((flag, _)) => (flag, true),
        None => (argument_text.as_ref(), false),
    };
    if CONFIG_CLI_FLAGS.contains(&flag) {
        FlagAction::Include {
            needs_value: !has_inline_value,
        }
    } else {
        FlagAction::Skip
    }
}

pub(crate) struct ConfigArgumentSplit {
    pub(crate) config_arguments: Vec<OsString>,
    pub(crate) command_arguments: Vec<OsString>,
}

/// Splits `args` into the loader's arguments and the command's arguments.
///
/// Both halves keep the program name as their first element.
pub(crate) fn split_config_arguments(args: &[OsString]) -> ConfigArgumentSplit {
    let Some((program, rest)) = args.split_first() else {
        return ConfigArgumentSplit {
            config_arguments: Vec::new(),
            command_arguments: Vec::new(),
        };
    };

    let mut config_arguments = vec![program.clone()];
    let mut remaining = rest.iter().peekable();
    while let Some(argument) = remaining.peek() {
        match process_config_flag(argument) {
            FlagAction::Include { needs_value } => {
                config_arguments.extend(remaining.next().cloned());
                if needs_value {
                    config_arguments.extend(remaining.next().cloned());
                }
            }
            FlagAction::Skip => break,
        }
    }

    let mut command_arguments = vec![program.clone()];
    command_arguments.extend(remaining.cloned());
    ConfigArgumentSplit {
        config_arguments,
        command_arguments,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn os_args(args: &[&str]) -> Vec<OsString> {
        args.iter().map(OsString::from).collect()
    }

    #[rstest]
    #[case("--log-filter=debug", FlagAction::Include { needs_value: false })]
    #[case("--log-filter", FlagAction::Include { needs_value: true })]
    #[case("--content-dir", FlagAction::Include { needs_value: true })]
    #[case("open", FlagAction::Skip)]
    #[case("--workspace", FlagAction::Skip)]
    fn classifies_flags(#[case] argument: &str, #[case] expected: FlagAction) {
        assert_eq!(process_config_flag(OsStr::new(argument)), expected);
    }

    #[test]
    fn splits_leading_configuration_flags() {
        let split = split_config_arguments(&os_args(&[
            "doclocale",
            "--log-filter",
            "debug",
            "--content-dir=docs",
            "open",
            "--locale",
            "pl",
        ]));

        assert_eq!(
            split.config_arguments,
            os_args(&["doclocale", "--log-filter", "debug", "--content-dir=docs"])
        );
        assert_eq!(
            split.command_arguments,
            os_args(&["doclocale", "open", "--locale", "pl"])
        );
    }

    #[test]
    fn configuration_flags_after_the_command_stay_with_it() {
        let split = split_config_arguments(&os_args(&["doclocale", "list", "--log-filter", "x"]));

        assert_eq!(split.config_arguments, os_args(&["doclocale"]));
        assert_eq!(
            split.command_arguments,
            os_args(&["doclocale", "list", "--log-filter", "x"])
        );
    }

    #[test]
    fn empty_arguments_split_into_nothing() {
        let split = split_config_arguments(&[]);
        assert!(split.config_arguments.is_empty());
        assert!(split.command_arguments.is_empty());
    }
}
