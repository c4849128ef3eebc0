use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;
use const_format::concatcp;
use serde::{Deserialize, Serialize};
use simple_error::SimpleResult;

use super::defaults::DEFAULT_MAX_P_VALUE;
use super::utils::{check_max_p_value, check_optional_filename, write_settings};

#[derive(Args, Deserialize, Serialize)]
pub struct SingleSettings {
    /// Directory for all single command output (must not already exist)
    #[arg(long, value_name = "DIR", default_value = concatcp!(env!("CARGO_PKG_NAME"), "_single_output"))]
    pub output_dir: Utf8PathBuf,

    /// ROH regions for the sample, in bcftools roh output format
    ///
    /// Only 'RG' region records are used. The file may be gzip-compressed.
    ///
    #[arg(long = "roh", value_name = "FILE")]
    pub roh_filename: Option<Utf8PathBuf>,

    /// Copy number segments for the sample, in bcftools cnv summary format
    #[arg(long = "cn-summary", value_name = "FILE")]
    pub cn_summary_filename: Option<Utf8PathBuf>,

    /// Sample name
    ///
    /// ROH records are restricted to this sample, and the name is used as the prefix for all
    /// output files.
    ///
    #[arg(long)]
    pub sample: Option<String>,

    /// ROH regions and copy number segments are only used in the overlap analysis if the p-value
    /// derived from their quality score is below this value
    ///
    #[arg(long, default_value_t = DEFAULT_MAX_P_VALUE)]
    pub max_p_value: f64,
}

impl SingleSettings {
    /// Prefix of all output filenames
    pub fn get_output_prefix(&self) -> &str {
        self.sample.as_deref().unwrap_or("sample")
    }
}

/// Validate settings and update to parameters that can't be processed automatically by clap.
///
/// Assumes that the logger is not setup
///
pub fn validate_and_fix_single_settings(settings: SingleSettings) -> SimpleResult<SingleSettings> {
    check_optional_filename(settings.roh_filename.as_deref(), "ROH")?;
    check_optional_filename(settings.cn_summary_filename.as_deref(), "copy number summary")?;
    check_max_p_value(settings.max_p_value)?;
    Ok(settings)
}

/// Write single command settings out in json format
pub fn write_single_settings(output_dir: &Utf8Path, settings: &SingleSettings) {
    write_settings(output_dir, settings, "single")
}
