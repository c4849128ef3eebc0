pub mod defaults;
mod paired;
mod shared;
mod single;
mod utils;

use camino::Utf8Path;
use clap::{Parser, Subcommand};
use simple_error::{SimpleResult, bail};

use self::paired::validate_and_fix_paired_settings;
pub use self::paired::{PairedSettings, write_paired_settings};
use self::shared::validate_and_fix_shared_settings;
pub use self::shared::SharedSettings;
use self::single::validate_and_fix_single_settings;
pub use self::single::{SingleSettings, write_single_settings};

pub const SETTINGS_FILENAME: &str = "run.settings.json";

#[derive(Subcommand)]
pub enum Commands {
    /// Find LoH events in one sample from its ROH regions and copy number segments
    Single(SingleSettings),

    /// Classify LoH changes between a pre and post sample from differential ROH regions and
    /// paired copy number segments
    Paired(PairedSettings),
}

#[derive(Parser)]
#[command(
    author,
    version,
    about,
    help_template = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}"
)]
#[clap(propagate_version = true, rename_all = "kebab_case")]
pub struct Settings {
    #[command(flatten)]
    pub shared: SharedSettings,

    #[command(subcommand)]
    pub command: Commands,
}

impl Settings {
    pub fn get_output_dir(&self) -> &Utf8Path {
        match &self.command {
            Commands::Single(x) => &x.output_dir,
            Commands::Paired(x) => &x.output_dir,
        }
    }
}

/// Checks if a directory does not exist
///
pub fn check_novel_dirname(dirname: &Utf8Path, label: &str) -> SimpleResult<()> {
    if dirname.exists() {
        bail!("{} already exists: \"{}\"", label, dirname);
    }
    Ok(())
}

/// Validate settings and update parameters that can't be processed by clap
///
fn validate_and_fix_settings_impl(mut settings: Settings) -> SimpleResult<Settings> {
    settings.shared = validate_and_fix_shared_settings(settings.shared)?;

    settings.command = match settings.command {
        Commands::Single(x) => {
            let x = validate_and_fix_single_settings(x)?;
            Commands::Single(x)
        }
        Commands::Paired(x) => {
            let x = validate_and_fix_paired_settings(x)?;
            Commands::Paired(x)
        }
    };

    Ok(settings)
}

/// Validate settings and update to parameters that can't be processed automatically by clap.
///
pub fn validate_and_fix_settings(settings: Settings) -> Settings {
    match validate_and_fix_settings_impl(settings) {
        Ok(x) => x,
        Err(msg) => {
            eprintln!("Invalid command-line setting: {}", msg);
            std::process::exit(exitcode::USAGE);
        }
    }
}

pub fn parse_settings() -> Settings {
    Settings::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_command() {
        let settings = Settings::try_parse_from([
            "lohscan",
            "single",
            "--sample",
            "s1",
            "--max-p-value",
            "0.01",
            "--threads",
            "2",
        ])
        .unwrap();
        let settings = validate_and_fix_settings_impl(settings).unwrap();
        assert_eq!(settings.shared.thread_count, 2);
        assert_eq!(settings.get_output_dir(), Utf8Path::new("lohscan_single_output"));
        match settings.command {
            Commands::Single(x) => {
                assert_eq!(x.get_output_prefix(), "s1");
                assert_eq!(x.max_p_value, 0.01);
                assert!(x.roh_filename.is_none());
            }
            Commands::Paired(_) => panic!("unexpected command"),
        }
    }

    #[test]
    fn test_zero_threads() {
        let settings = Settings::try_parse_from(["lohscan", "paired", "--threads", "0"]).unwrap();
        assert!(validate_and_fix_settings_impl(settings).is_err());
    }
}
