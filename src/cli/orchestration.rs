//! Main workflow orchestration logic
//!
//! Keeps the calculation workflow out of main.rs so it can be driven
//! without clap: layer the options, honour a version override, open the
//! repository and resolve.

use std::path::PathBuf;

use crate::config::{load_config, OptionNames, Options, RawOptions};
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::domain::Version;
use crate::error::{MinVerError, Result};
use crate::git::Git2Repository;
use crate::resolver::Resolver;

/// Arguments for the calculation workflow
///
/// Mirrors the CLI Args but in a format suitable for orchestration logic.
#[derive(Debug, Clone, PartialEq)]
pub struct RunArgs {
    /// Repository or working directory to calculate the version for
    pub repo: PathBuf,

    /// Path to a custom config file
    pub config_path: Option<PathBuf>,

    /// Option values given as flags
    pub flags: RawOptions,
}

impl Default for RunArgs {
    fn default() -> Self {
        RunArgs {
            repo: PathBuf::from("."),
            config_path: None,
            flags: RawOptions::default(),
        }
    }
}

/// Layer every option source
///
/// Flags mask environment variables, which mask the config file, which masks
/// the built-in defaults. Each source is validated as it is read, flags
/// first.
pub fn load_options(args: &RunArgs) -> Result<Options> {
    let flags = args.flags.clone().validate(&OptionNames::FLAGS)?;
    let env = Options::from_env()?;
    let file = Options::from_file(load_config(args.config_path.as_deref())?)?;

    Ok(flags.mask(env).mask(file))
}

/// Calculate the version for `args.repo`
///
/// # Returns
/// * `Ok(version)` - The override if one is set, the default version when
///   the path is not inside a repository, otherwise the calculated version
/// * `Err(PathNotFound)` - `args.repo` does not exist
/// * `Err` - The repository could not be read
pub fn run(args: &RunArgs, options: &Options, sink: &mut dyn DiagnosticSink) -> Result<Version> {
    if !args.repo.exists() {
        return Err(MinVerError::PathNotFound(args.repo.display().to_string()));
    }

    if let Some(version) = &options.version_override {
        sink.emit(Diagnostic::VersionOverride(version.clone()));
        return Ok(version.clone());
    }

    let Some(repo) = Git2Repository::discover(&args.repo)? else {
        sink.emit(Diagnostic::NoRepository {
            path: args.repo.display().to_string(),
        });
        return Ok(Version::default());
    };

    Resolver::new(options.settings()).resolve(&repo, sink)
}
