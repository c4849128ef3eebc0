use camino::Utf8Path;
use log::info;
use serde::Serialize;
use simple_error::{SimpleResult, bail};
use unwrap::unwrap;

use super::SETTINGS_FILENAME;

/// Check an optional input filename
///
/// Assumes no logger has been configured yet
///
pub fn check_optional_filename(filename_opt: Option<&Utf8Path>, label: &str) -> SimpleResult<()> {
    if let Some(filename) = filename_opt {
        if !filename.exists() {
            bail!("Can't find specified {label} file: '{filename}'");
        }
        if !filename.is_file() {
            bail!("Specified {label} file path does not appear to be a file: '{filename}'");
        }
    }
    Ok(())
}

pub fn check_max_p_value(max_p_value: f64) -> SimpleResult<()> {
    if !(max_p_value > 0.0 && max_p_value <= 1.0) {
        bail!("--max-p-value must be in the range (0,1], but is set to {max_p_value}");
    }
    Ok(())
}

/// Write command settings out in json format
pub fn write_settings<T: Serialize>(output_dir: &Utf8Path, settings: &T, label: &str) {
    let filename = output_dir.join(SETTINGS_FILENAME);

    info!("Writing {label} settings to file: '{filename}'");

    let f = unwrap!(
        std::fs::File::create(&filename),
        "Unable to create {label} settings json file: '{filename}'"
    );

    unwrap!(
        serde_json::to_writer_pretty(&f, &settings),
        "Unable to write {label} settings json file: '{filename}'"
    );
}
