//! Track stats for the whole run
//!

use std::fs::File;

use camino::Utf8Path;
use log::info;
use serde::Serialize;
use unwrap::unwrap;

use crate::read_inputs::InputReadStats;
use crate::summary_stats::{CnvSizeClassSummary, EventSummary, OverlapSummary};

pub const RUN_STATS_FILENAME: &str = "run.stats.json";

/// Region counts through the significance filter
#[derive(Clone, Debug, Default, Serialize)]
pub struct FilterStats {
    pub input_count: usize,
    pub significant_count: usize,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct CopyNumberCohortStats {
    pub deletion_count: usize,
    pub normal_count: usize,

    /// Only defined for paired segments
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mixed_count: Option<usize>,

    pub amplification_count: usize,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct CnlohOverlayStats {
    pub copy_loss_count: usize,
    pub cnloh_candidate_count: usize,
}

#[derive(Clone, Debug, Serialize)]
pub struct RohStatusStats {
    pub status: String,
    pub input_count: usize,
    pub significant_count: usize,
}

#[derive(Serialize)]
pub struct SingleRunStats {
    pub sample_name: String,
    pub roh_input: InputReadStats,
    pub cn_input: InputReadStats,
    pub roh_filter: FilterStats,
    pub cn_filter: FilterStats,
    pub cn_cohorts: CopyNumberCohortStats,
    pub overlap_summary: OverlapSummary,
    pub cnv_size_classes: CnvSizeClassSummary,
    pub cnloh_overlay: CnlohOverlayStats,
}

#[derive(Serialize)]
pub struct PairedRunStats {
    pub pre_sample_name: String,
    pub post_sample_name: String,
    pub roh_input: InputReadStats,
    pub cn_input: InputReadStats,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pre_cn_input: Option<InputReadStats>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_cn_input: Option<InputReadStats>,

    pub roh_filter: FilterStats,
    pub roh_status: Vec<RohStatusStats>,
    pub cn_filter: FilterStats,
    pub cn_cohorts: CopyNumberCohortStats,
    pub overlap_summary: OverlapSummary,
    pub event_summary: Vec<EventSummary>,
    pub cnv_size_classes: CnvSizeClassSummary,
    pub pre_cnloh_overlay: CnlohOverlayStats,
    pub post_cnloh_overlay: CnlohOverlayStats,
}

/// Write run_stats structure out in json format
pub fn write_run_stats<T: Serialize>(output_dir: &Utf8Path, run_stats: &T) {
    let filename = output_dir.join(RUN_STATS_FILENAME);

    info!("Writing run statistics to file: '{filename}'");

    let f = unwrap!(
        File::create(&filename),
        "Unable to create run statistics json file: '{filename}'"
    );

    unwrap!(
        serde_json::to_writer_pretty(&f, &run_stats),
        "Unable to write run statistics json file: '{filename}'"
    );
}
