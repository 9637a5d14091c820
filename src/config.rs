use crate::domain::{Identifier, MajorMinor, Version, VersionPart};
use crate::error::{MinVerError, OptionSource, Result};
use crate::logging::Verbosity;
use crate::resolver::Settings;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Name of the config file looked up in the working and user config directories
pub const CONFIG_FILE_NAME: &str = "minver.toml";

const BOOL_VALUES: &str = "true, false (case insensitive)";
const IDENTIFIER_VALUES: &str =
    "dot-separated identifiers of [0-9A-Za-z-], numeric ones without leading zeros";
const BUILD_METADATA_VALUES: &str = "dot-separated identifiers of [0-9A-Za-z-]";
const VERSION_VALUES: &str = "SemVer 2.0 versions, MAJOR.MINOR.PATCH[-PRERELEASE][+BUILD]";

/// Config file contents, as written by the user
///
/// Every key is optional. Values are validated when converted to [Options].
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct ConfigFile {
    #[serde(default)]
    pub auto_increment: Option<String>,

    #[serde(default)]
    pub build_metadata: Option<String>,

    /// Dot-separated, e.g. `"preview.0"`
    #[serde(default)]
    pub default_pre_release_identifiers: Option<String>,

    #[serde(default)]
    pub default_pre_release_phase: Option<String>,

    #[serde(default)]
    pub ignore_height: Option<bool>,

    #[serde(default)]
    pub minimum_major_minor: Option<String>,

    #[serde(default)]
    pub tag_prefix: Option<String>,

    #[serde(default)]
    pub verbosity: Option<String>,

    #[serde(default)]
    pub version_override: Option<String>,

    #[serde(default)]
    pub ignore_pre_release_identifiers: Option<bool>,

    #[serde(default)]
    pub include_branch_name: Option<bool>,

    #[serde(default)]
    pub ignore_branch_names: Option<Vec<String>>,
}

/// Validated options from a single source
///
/// `None` means the source didn't set the option. Sources are combined with
/// [Options::mask], and the result turned into [Settings] for the resolver.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options {
    pub auto_increment: Option<VersionPart>,
    pub build_metadata: Option<String>,
    pub default_pre_release_identifiers: Option<Vec<Identifier>>,
    pub default_pre_release_phase: Option<Identifier>,
    pub ignore_height: Option<bool>,
    pub minimum_major_minor: Option<MajorMinor>,
    pub tag_prefix: Option<String>,
    pub verbosity: Option<Verbosity>,
    pub version_override: Option<Version>,
    pub ignore_pre_release_identifiers: Option<bool>,
    pub include_branch_name: Option<bool>,
    pub ignore_branch_names: Option<Vec<String>>,
}

/// Option values as text, before validation
///
/// Flags and environment variables both arrive as strings. The origin of each
/// value is supplied by [OptionNames] so errors point at the right input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawOptions {
    pub auto_increment: Option<String>,
    pub build_metadata: Option<String>,
    pub default_pre_release_identifiers: Option<String>,
    pub default_pre_release_phase: Option<String>,
    pub ignore_height: Option<String>,
    pub minimum_major_minor: Option<String>,
    pub tag_prefix: Option<String>,
    pub verbosity: Option<String>,
    pub version_override: Option<String>,
    pub ignore_pre_release_identifiers: Option<String>,
    pub include_branch_name: Option<String>,
    pub ignore_branch_names: Option<Vec<String>>,
}

/// The name of every option within one source
pub struct OptionNames {
    pub auto_increment: OptionSource,
    pub build_metadata: OptionSource,
    pub default_pre_release_identifiers: OptionSource,
    pub default_pre_release_phase: OptionSource,
    pub ignore_height: OptionSource,
    pub minimum_major_minor: OptionSource,
    pub tag_prefix: OptionSource,
    pub verbosity: OptionSource,
    pub version_override: OptionSource,
    pub ignore_pre_release_identifiers: OptionSource,
    pub include_branch_name: OptionSource,
}

impl OptionNames {
    pub const ENV: OptionNames = OptionNames {
        auto_increment: OptionSource::EnvVar("MinVerAutoIncrement"),
        build_metadata: OptionSource::EnvVar("MinVerBuildMetadata"),
        default_pre_release_identifiers: OptionSource::EnvVar("MinVerDefaultPreReleaseIdentifiers"),
        default_pre_release_phase: OptionSource::EnvVar("MinVerDefaultPreReleasePhase"),
        ignore_height: OptionSource::EnvVar("MinVerIgnoreHeight"),
        minimum_major_minor: OptionSource::EnvVar("MinVerMinimumMajorMinor"),
        tag_prefix: OptionSource::EnvVar("MinVerTagPrefix"),
        verbosity: OptionSource::EnvVar("MinVerVerbosity"),
        version_override: OptionSource::EnvVar("MinVerVersionOverride"),
        ignore_pre_release_identifiers: OptionSource::EnvVar("MinVerIgnorePreReleaseIdentifiers"),
        include_branch_name: OptionSource::EnvVar("MinVerIncludeBranchName"),
    };

    pub const FILE: OptionNames = OptionNames {
        auto_increment: OptionSource::ConfigKey("auto_increment"),
        build_metadata: OptionSource::ConfigKey("build_metadata"),
        default_pre_release_identifiers: OptionSource::ConfigKey("default_pre_release_identifiers"),
        default_pre_release_phase: OptionSource::ConfigKey("default_pre_release_phase"),
        ignore_height: OptionSource::ConfigKey("ignore_height"),
        minimum_major_minor: OptionSource::ConfigKey("minimum_major_minor"),
        tag_prefix: OptionSource::ConfigKey("tag_prefix"),
        verbosity: OptionSource::ConfigKey("verbosity"),
        version_override: OptionSource::ConfigKey("version_override"),
        ignore_pre_release_identifiers: OptionSource::ConfigKey("ignore_pre_release_identifiers"),
        include_branch_name: OptionSource::ConfigKey("include_branch_name"),
    };

    pub const FLAGS: OptionNames = OptionNames {
        auto_increment: OptionSource::Flag("--auto-increment"),
        build_metadata: OptionSource::Flag("--build-metadata"),
        default_pre_release_identifiers: OptionSource::Flag("--default-pre-release-identifiers"),
        default_pre_release_phase: OptionSource::Flag("--default-pre-release-phase"),
        ignore_height: OptionSource::Flag("--ignore-height"),
        minimum_major_minor: OptionSource::Flag("--minimum-major-minor"),
        tag_prefix: OptionSource::Flag("--tag-prefix"),
        verbosity: OptionSource::Flag("--verbosity"),
        version_override: OptionSource::Flag("--version-override"),
        ignore_pre_release_identifiers: OptionSource::Flag("--ignore-pre-release-identifiers"),
        include_branch_name: OptionSource::Flag("--include-branch-name"),
    };
}

/// Validate an optional text value, treating empty text as unset
fn validated<T>(
    value: Option<String>,
    origin: &OptionSource,
    allowed: &str,
    parse: impl FnOnce(&str) -> Option<T>,
) -> Result<Option<T>> {
    match value.filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) => match parse(&v) {
            Some(parsed) => Ok(Some(parsed)),
            None => Err(MinVerError::invalid_option(origin.clone(), v, allowed)),
        },
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    if value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

fn parse_identifiers(value: &str) -> Option<Vec<Identifier>> {
    value
        .split('.')
        .map(|part| Identifier::parse(part).ok())
        .collect()
}

fn is_build_metadata(value: &str) -> bool {
    value
        .split('.')
        .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_alphanumeric() || c == '-'))
}

impl RawOptions {
    /// Read the `MinVer*` environment variables of this process
    pub fn from_env() -> Self {
        let vars = std::env::vars_os()
            .filter_map(|(name, value)| Some((name.into_string().ok()?, value.into_string().ok()?)));
        Self::from_vars(vars)
    }

    /// Read `MinVer*` variables from `vars`
    ///
    /// Names match case-insensitively. When several names match, the first in
    /// ordinal order wins. `MinVerIgnoreBranchNames` is `;`-separated.
    pub fn from_vars<I>(vars: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let vars: BTreeMap<String, String> = vars.into_iter().collect();
        let get = |name: &str| {
            vars.iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, value)| value.clone())
                .filter(|value| !value.is_empty())
        };

        RawOptions {
            auto_increment: get("MinVerAutoIncrement"),
            build_metadata: get("MinVerBuildMetadata"),
            default_pre_release_identifiers: get("MinVerDefaultPreReleaseIdentifiers"),
            default_pre_release_phase: get("MinVerDefaultPreReleasePhase"),
            ignore_height: get("MinVerIgnoreHeight"),
            minimum_major_minor: get("MinVerMinimumMajorMinor"),
            tag_prefix: get("MinVerTagPrefix"),
            verbosity: get("MinVerVerbosity"),
            version_override: get("MinVerVersionOverride"),
            ignore_pre_release_identifiers: get("MinVerIgnorePreReleaseIdentifiers"),
            include_branch_name: get("MinVerIncludeBranchName"),
            ignore_branch_names: get("MinVerIgnoreBranchNames")
                .map(|names| names.split(';').map(str::to_string).collect()),
        }
    }

    /// Validate every value, naming the offending input from `names` on error
    pub fn validate(self, names: &OptionNames) -> Result<Options> {
        Ok(Options {
            auto_increment: validated(
                self.auto_increment,
                &names.auto_increment,
                VersionPart::VALID_VALUES,
                |v| v.parse().ok(),
            )?,
            build_metadata: validated(
                self.build_metadata,
                &names.build_metadata,
                BUILD_METADATA_VALUES,
                |v| is_build_metadata(v).then(|| v.to_string()),
            )?,
            default_pre_release_identifiers: validated(
                self.default_pre_release_identifiers,
                &names.default_pre_release_identifiers,
                IDENTIFIER_VALUES,
                parse_identifiers,
            )?,
            default_pre_release_phase: validated(
                self.default_pre_release_phase,
                &names.default_pre_release_phase,
                IDENTIFIER_VALUES,
                |v| Identifier::parse(v).ok(),
            )?,
            ignore_height: validated(
                self.ignore_height,
                &names.ignore_height,
                BOOL_VALUES,
                parse_bool,
            )?,
            minimum_major_minor: validated(
                self.minimum_major_minor,
                &names.minimum_major_minor,
                MajorMinor::VALID_VALUES,
                |v| v.parse().ok(),
            )?,
            tag_prefix: self.tag_prefix.filter(|v| !v.is_empty()),
            verbosity: validated(
                self.verbosity,
                &names.verbosity,
                Verbosity::VALID_VALUES,
                |v| v.parse().ok(),
            )?,
            version_override: validated(
                self.version_override,
                &names.version_override,
                VERSION_VALUES,
                |v| v.parse().ok(),
            )?,
            ignore_pre_release_identifiers: validated(
                self.ignore_pre_release_identifiers,
                &names.ignore_pre_release_identifiers,
                BOOL_VALUES,
                parse_bool,
            )?,
            include_branch_name: validated(
                self.include_branch_name,
                &names.include_branch_name,
                BOOL_VALUES,
                parse_bool,
            )?,
            ignore_branch_names: self
                .ignore_branch_names
                .map(|names| names.into_iter().filter(|n| !n.is_empty()).collect::<Vec<_>>())
                .filter(|names| !names.is_empty()),
        })
    }
}

impl From<ConfigFile> for RawOptions {
    fn from(file: ConfigFile) -> Self {
        RawOptions {
            auto_increment: file.auto_increment,
            build_metadata: file.build_metadata,
            default_pre_release_identifiers: file.default_pre_release_identifiers,
            default_pre_release_phase: file.default_pre_release_phase,
            ignore_height: file.ignore_height.map(|b| b.to_string()),
            minimum_major_minor: file.minimum_major_minor,
            tag_prefix: file.tag_prefix,
            verbosity: file.verbosity,
            version_override: file.version_override,
            ignore_pre_release_identifiers: file.ignore_pre_release_identifiers.map(|b| b.to_string()),
            include_branch_name: file.include_branch_name.map(|b| b.to_string()),
            ignore_branch_names: file.ignore_branch_names,
        }
    }
}

impl Options {
    /// Options from the environment of this process
    pub fn from_env() -> Result<Self> {
        RawOptions::from_env().validate(&OptionNames::ENV)
    }

    /// Options from a parsed config file
    pub fn from_file(file: ConfigFile) -> Result<Self> {
        RawOptions::from(file).validate(&OptionNames::FILE)
    }

    /// Combine with a lower-priority source: values set here win
    pub fn mask(self, lower: Options) -> Options {
        Options {
            auto_increment: self.auto_increment.or(lower.auto_increment),
            build_metadata: self.build_metadata.or(lower.build_metadata),
            default_pre_release_identifiers: self
                .default_pre_release_identifiers
                .or(lower.default_pre_release_identifiers),
            default_pre_release_phase: self
                .default_pre_release_phase
                .or(lower.default_pre_release_phase),
            ignore_height: self.ignore_height.or(lower.ignore_height),
            minimum_major_minor: self.minimum_major_minor.or(lower.minimum_major_minor),
            tag_prefix: self.tag_prefix.or(lower.tag_prefix),
            verbosity: self.verbosity.or(lower.verbosity),
            version_override: self.version_override.or(lower.version_override),
            ignore_pre_release_identifiers: self
                .ignore_pre_release_identifiers
                .or(lower.ignore_pre_release_identifiers),
            include_branch_name: self.include_branch_name.or(lower.include_branch_name),
            ignore_branch_names: self.ignore_branch_names.or(lower.ignore_branch_names),
        }
    }

    /// Resolver settings, with built-in defaults for anything unset
    pub fn settings(&self) -> Settings {
        let defaults = Settings::default();
        Settings {
            tag_prefix: self.tag_prefix.clone().unwrap_or(defaults.tag_prefix),
            auto_increment: self.auto_increment.unwrap_or(defaults.auto_increment),
            default_pre_release_identifiers: self
                .default_pre_release_identifiers
                .clone()
                .unwrap_or(defaults.default_pre_release_identifiers),
            default_pre_release_phase: self.default_pre_release_phase.clone(),
            minimum_major_minor: self.minimum_major_minor,
            build_metadata: self.build_metadata.clone(),
            ignore_height: self.ignore_height.unwrap_or(defaults.ignore_height),
            ignore_pre_release_identifiers: self
                .ignore_pre_release_identifiers
                .unwrap_or(defaults.ignore_pre_release_identifiers),
            include_branch_name: self.include_branch_name.unwrap_or(defaults.include_branch_name),
            ignore_branch_names: self
                .ignore_branch_names
                .clone()
                .unwrap_or(defaults.ignore_branch_names),
        }
    }

    pub fn verbosity(&self) -> Verbosity {
        self.verbosity.unwrap_or_default()
    }
}

/// Locate the config file to use, if any
///
/// Looks in the following order:
/// 1. Custom path provided as parameter
/// 2. `minver.toml` in the current directory
/// 3. `minver.toml` in the user config directory
pub fn find_config_file(config_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = config_path {
        return Some(path.to_path_buf());
    }

    let local = Path::new(CONFIG_FILE_NAME);
    if local.exists() {
        return Some(local.to_path_buf());
    }

    dirs::config_dir()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .filter(|path| path.exists())
}

/// Loads the config file or returns an empty one.
///
/// # Arguments
/// * `config_path` - Optional path to a custom config file
///
/// # Returns
/// * `Ok(ConfigFile)` - Loaded file, or an empty one if no file was found
/// * `Err` - If a file was found (or named) but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>) -> Result<ConfigFile> {
    let Some(path) = find_config_file(config_path) else {
        return Ok(ConfigFile::default());
    };

    let contents = fs::read_to_string(&path).map_err(|e| {
        io::Error::new(e.kind(), format!("failed to read '{}': {}", path.display(), e))
    })?;

    toml::from_str(&contents)
        .map_err(|e| MinVerError::config(format!("Failed to parse '{}': {}", path.display(), e)))
}
