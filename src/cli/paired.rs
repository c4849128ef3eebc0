use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;
use const_format::concatcp;
use serde::{Deserialize, Serialize};
use simple_error::{SimpleResult, bail};

use super::defaults::DEFAULT_MAX_P_VALUE;
use super::utils::{check_max_p_value, check_optional_filename, write_settings};

#[derive(Args, Deserialize, Serialize)]
pub struct PairedSettings {
    /// Directory for all paired command output (must not already exist)
    #[arg(long, value_name = "DIR", default_value = concatcp!(env!("CARGO_PKG_NAME"), "_paired_output"))]
    pub output_dir: Utf8PathBuf,

    /// Differential ROH table for the sample pair
    ///
    /// The first line is a header. Each following line gives the ROH status (NEW_IN_POST,
    /// LOST_IN_POST or UNCHANGED), chromosome, start, end and quality of one region.
    ///
    #[arg(long = "roh", value_name = "FILE")]
    pub roh_filename: Option<Utf8PathBuf>,

    /// Copy number segments jointly called over the sample pair, in bcftools cnv paired summary
    /// format
    ///
    #[arg(long = "cn-summary", value_name = "FILE")]
    pub cn_summary_filename: Option<Utf8PathBuf>,

    /// Copy number segments called independently on the pre sample, in bcftools cnv summary
    /// format
    ///
    /// When given, these segments replace the pre copy number of the paired summary for the pre
    /// sample copy-loss and cnLoH candidate tracks.
    ///
    #[arg(long = "pre-cn-summary", value_name = "FILE")]
    pub pre_cn_summary_filename: Option<Utf8PathBuf>,

    /// Copy number segments called independently on the post sample, in bcftools cnv summary
    /// format
    ///
    #[arg(long = "post-cn-summary", value_name = "FILE")]
    pub post_cn_summary_filename: Option<Utf8PathBuf>,

    /// Name of the pre sample
    #[arg(long)]
    pub pre_sample: Option<String>,

    /// Name of the post sample
    #[arg(long)]
    pub post_sample: Option<String>,

    /// ROH regions and copy number segments are only used in the overlap analysis if the p-value
    /// derived from their quality score is below this value
    ///
    #[arg(long, default_value_t = DEFAULT_MAX_P_VALUE)]
    pub max_p_value: f64,
}

impl PairedSettings {
    pub fn get_pre_label(&self) -> &str {
        self.pre_sample.as_deref().unwrap_or("pre")
    }

    pub fn get_post_label(&self) -> &str {
        self.post_sample.as_deref().unwrap_or("post")
    }

    /// Prefix of all output filenames
    pub fn get_output_prefix(&self) -> String {
        format!("{}_{}", self.get_pre_label(), self.get_post_label())
    }
}

/// Validate settings and update to parameters that can't be processed automatically by clap.
///
/// Assumes that the logger is not setup
///
pub fn validate_and_fix_paired_settings(settings: PairedSettings) -> SimpleResult<PairedSettings> {
    check_optional_filename(settings.roh_filename.as_deref(), "differential ROH")?;
    check_optional_filename(
        settings.cn_summary_filename.as_deref(),
        "paired copy number summary",
    )?;
    check_optional_filename(
        settings.pre_cn_summary_filename.as_deref(),
        "pre sample copy number summary",
    )?;
    check_optional_filename(
        settings.post_cn_summary_filename.as_deref(),
        "post sample copy number summary",
    )?;
    check_max_p_value(settings.max_p_value)?;

    if let (Some(pre), Some(post)) = (&settings.pre_sample, &settings.post_sample) {
        if pre == post {
            bail!("--pre-sample and --post-sample must be different, both are '{pre}'");
        }
    }

    Ok(settings)
}

/// Write paired command settings out in json format
pub fn write_paired_settings(output_dir: &Utf8Path, settings: &PairedSettings) {
    write_settings(output_dir, settings, "paired")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_test_settings() -> PairedSettings {
        PairedSettings {
            output_dir: Utf8PathBuf::from("out"),
            roh_filename: None,
            cn_summary_filename: None,
            pre_cn_summary_filename: None,
            post_cn_summary_filename: None,
            pre_sample: None,
            post_sample: None,
            max_p_value: DEFAULT_MAX_P_VALUE,
        }
    }

    #[test]
    fn test_output_prefix() {
        let mut settings = get_test_settings();
        assert_eq!(settings.get_output_prefix(), "pre_post");

        settings.pre_sample = Some("A".to_string());
        settings.post_sample = Some("B".to_string());
        assert_eq!(settings.get_output_prefix(), "A_B");
    }

    #[test]
    fn test_validate_paired_settings() {
        let settings = get_test_settings();
        assert!(validate_and_fix_paired_settings(settings).is_ok());

        let mut settings = get_test_settings();
        settings.max_p_value = 0.0;
        assert!(validate_and_fix_paired_settings(settings).is_err());

        let mut settings = get_test_settings();
        settings.pre_sample = Some("A".to_string());
        settings.post_sample = Some("A".to_string());
        assert!(validate_and_fix_paired_settings(settings).is_err());

        let mut settings = get_test_settings();
        settings.roh_filename = Some(Utf8PathBuf::from("./test_data/not_there.tsv"));
        assert!(validate_and_fix_paired_settings(settings).is_err());
    }
}
