use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use minver::cli::{self, RunArgs};
use minver::config::RawOptions;
use minver::diagnostics::TracingSink;
use minver::error::MinVerError;
use minver::{logging, ui};

#[derive(clap::Parser)]
#[command(
    name = "minver",
    version,
    about = "Calculate a version from the latest version tag and the commits since"
)]
struct Args {
    #[arg(
        short,
        long,
        value_name = "PART",
        help = "major, minor, or patch (default)"
    )]
    auto_increment: Option<String>,

    #[arg(short, long, value_name = "BUILD_METADATA")]
    build_metadata: Option<String>,

    #[arg(
        short = 'p',
        long,
        value_name = "IDENTIFIERS",
        help = "alpha.0 (default), preview.0, etc."
    )]
    default_pre_release_identifiers: Option<String>,

    #[arg(
        long,
        value_name = "PHASE",
        help = "Replaces the first default pre-release identifier"
    )]
    default_pre_release_phase: Option<String>,

    #[arg(short, long, help = "Use the latest tag (or root commit) as-is, without adding height")]
    ignore_height: bool,

    #[arg(short = 'm', long, value_name = "MINIMUM_MAJOR_MINOR", help = "1.0, 1.1, etc.")]
    minimum_major_minor: Option<String>,

    #[arg(
        short,
        long,
        value_name = "PATH",
        default_value = ".",
        help = "Repository or working directory"
    )]
    repo: PathBuf,

    #[arg(short, long, value_name = "TAG_PREFIX", help = "v, i.e. v1.0.0, etc.")]
    tag_prefix: Option<String>,

    #[arg(
        short,
        long,
        value_name = "VERBOSITY",
        help = "error, warn, info (default), debug, or trace"
    )]
    verbosity: Option<String>,

    #[arg(
        short = 'o',
        long,
        value_name = "VERSION",
        help = "Use this version instead of calculating one"
    )]
    version_override: Option<String>,

    #[arg(long, help = "Don't add default pre-release identifiers when building past a release")]
    ignore_pre_release_identifiers: bool,

    #[arg(long, help = "Append the current branch name as a pre-release identifier")]
    include_branch_name: bool,

    #[arg(
        long,
        value_name = "BRANCHES",
        help = "Space-separated branch names never appended to the version"
    )]
    ignore_branch_names: Option<String>,

    #[arg(short, long, value_name = "FILE", help = "Custom configuration file path")]
    config: Option<PathBuf>,
}

impl Args {
    fn into_run_args(self) -> RunArgs {
        let flag = |set: bool| set.then(|| "true".to_string());

        RunArgs {
            repo: self.repo,
            config_path: self.config,
            flags: RawOptions {
                auto_increment: self.auto_increment,
                build_metadata: self.build_metadata,
                default_pre_release_identifiers: self.default_pre_release_identifiers,
                default_pre_release_phase: self.default_pre_release_phase,
                ignore_height: flag(self.ignore_height),
                minimum_major_minor: self.minimum_major_minor,
                tag_prefix: self.tag_prefix,
                verbosity: self.verbosity,
                version_override: self.version_override,
                ignore_pre_release_identifiers: flag(self.ignore_pre_release_identifiers),
                include_branch_name: flag(self.include_branch_name),
                ignore_branch_names: self
                    .ignore_branch_names
                    .map(|names| names.split_whitespace().map(str::to_string).collect()),
            },
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    match calculate(args.into_run_args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ui::display_error(&e.to_string());

            match e.downcast_ref::<MinVerError>() {
                Some(err) if err.is_usage_error() => {
                    ui::display_hint("run 'minver --help' for usage");
                    ExitCode::from(2)
                }
                _ => ExitCode::FAILURE,
            }
        }
    }
}

fn calculate(run_args: RunArgs) -> Result<()> {
    let options = cli::load_options(&run_args)?;
    logging::init(options.verbosity());

    let version = cli::run(&run_args, &options, &mut TracingSink)?;
    ui::display_version(&version);

    Ok(())
}
