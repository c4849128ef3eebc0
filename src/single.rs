use log::info;
use simple_error::{SimpleResult, bail};
use thousands::Separable;

use crate::cli::defaults::{COPY_LOSS_COPY_NUMBER, NORMAL_COPY_NUMBER};
use crate::cli::{self, SingleSettings};
use crate::cnloh_overlay::get_cnloh_overlay;
use crate::event_classifier::classify_single_overlaps;
use crate::overlap::{get_total_overlap_length, overlap_rows};
use crate::read_inputs::{
    InputReadStats, InputRecords, open_input_file, read_bcftools_roh, read_single_cn_summary,
};
use crate::region_filter::filter_significant;
use crate::run_stats::{
    CnlohOverlayStats, CopyNumberCohortStats, FilterStats, SingleRunStats, write_run_stats,
};
use crate::scored_region::{CnSegment, RohRegion, Scored};
use crate::stratify::{get_single_loh_universe, stratify_single};
use crate::summary_stats::{Cohort, get_overlap_summary, get_single_cnv_size_classes};
use crate::write_outputs::{
    write_classified_overlaps, write_cnv_size_classes, write_region_bed, write_summary_stats,
};

fn read_single_roh(settings: &SingleSettings) -> InputRecords<Vec<RohRegion>> {
    match &settings.roh_filename {
        Some(filename) => read_bcftools_roh(
            open_input_file(filename),
            settings.sample.as_deref(),
            filename.as_str(),
        ),
        None => {
            info!("No ROH input given");
            InputRecords {
                records: Vec::new(),
                stats: InputReadStats::default(),
            }
        }
    }
}

fn read_single_cn(settings: &SingleSettings) -> InputRecords<Vec<CnSegment>> {
    match &settings.cn_summary_filename {
        Some(filename) => read_single_cn_summary(open_input_file(filename), filename.as_str()),
        None => {
            info!("No copy number summary input given");
            InputRecords {
                records: Vec::new(),
                stats: InputReadStats::default(),
            }
        }
    }
}

/// Fail the run if no ROH regions or copy number segments were read from any input
///
fn check_single_inputs(roh: &[RohRegion], cn: &[CnSegment]) -> SimpleResult<()> {
    if roh.is_empty() && cn.is_empty() {
        bail!("No ROH regions or copy number segments found in any input");
    }
    Ok(())
}

/// Find and classify LoH events in one sample
///
pub fn run_single(
    shared_settings: &cli::SharedSettings,
    settings: &SingleSettings,
) -> SimpleResult<()> {
    let roh_input = read_single_roh(settings);
    let cn_input = read_single_cn(settings);
    check_single_inputs(&roh_input.records, &cn_input.records)?;

    cli::write_single_settings(&settings.output_dir, settings);

    let worker_pool = rayon::ThreadPoolBuilder::new()
        .num_threads(shared_settings.thread_count)
        .build()
        .unwrap();

    let output_dir = &settings.output_dir;
    let prefix = settings.get_output_prefix();
    let filename = |suffix: &str| format!("{prefix}.{suffix}");

    let roh = filter_significant(&roh_input.records, settings.max_p_value);
    let cn = filter_significant(&cn_input.records, settings.max_p_value);
    info!(
        "Significant ROH regions: {} of {}",
        roh.len().separate_with_commas(),
        roh_input.records.len().separate_with_commas()
    );
    info!(
        "Significant copy number segments: {} of {}",
        cn.len().separate_with_commas(),
        cn_input.records.len().separate_with_commas()
    );

    let strat = stratify_single(&cn, NORMAL_COPY_NUMBER);
    let cn_universe = get_single_loh_universe(&cn, NORMAL_COPY_NUMBER);
    info!(
        "Copy number segments for LoH analysis: {} of {} ({} deletions, {} normal). Excluded amplifications: {}",
        cn_universe.len().separate_with_commas(),
        strat.total_count().separate_with_commas(),
        strat.deletions.len().separate_with_commas(),
        strat.normal.len().separate_with_commas(),
        strat.amplifications.len().separate_with_commas()
    );

    let (classified, overlap_summary, overlay) = worker_pool.install(|| {
        let overlaps = overlap_rows(&roh, &cn_universe);
        let classified = classify_single_overlaps(&overlaps, NORMAL_COPY_NUMBER);
        let overlap_summary = get_overlap_summary(
            &roh,
            &strat.deletions,
            &strat.normal,
            overlaps.len(),
            get_total_overlap_length(&overlaps),
        );
        let overlay = get_cnloh_overlay(
            &roh,
            &cn_input.records,
            COPY_LOSS_COPY_NUMBER,
            NORMAL_COPY_NUMBER,
            shared_settings.debug_cnloh_overlay,
        );
        (classified, overlap_summary, overlay)
    });
    info!(
        "ROH/CN overlaps: {}",
        classified.len().separate_with_commas()
    );
    info!(
        "ROH covered by CN: {:.2}%, CN covered by ROH: {:.2}%",
        overlap_summary.roh_covered_by_cn_percent, overlap_summary.cn_covered_by_roh_percent
    );
    if let Some(union) = overlap_summary.get_cohort(Cohort::Union) {
        info!(
            "ROH/CN union: {} regions covering {} bases",
            union.count.separate_with_commas(),
            union.total_length.separate_with_commas()
        );
    }

    let cnv_size_classes =
        get_single_cnv_size_classes(&cn_input.records, &cn, NORMAL_COPY_NUMBER);

    write_classified_overlaps(output_dir, &filename("overlaps.tsv"), &classified, false);
    write_summary_stats(output_dir, &filename("summary_stats.tsv"), &overlap_summary);
    write_cnv_size_classes(
        output_dir,
        &filename("cnv_size_classes.tsv"),
        &cnv_size_classes,
    );
    write_region_bed(
        output_dir,
        &filename("roh_data.bed"),
        roh.iter().map(|x| x.region()),
        "significant ROH regions",
    );
    write_region_bed(
        output_dir,
        &filename("cn_data.bed"),
        cn_universe.iter().map(|x| x.region()),
        "LoH copy number segments",
    );
    write_region_bed(
        output_dir,
        &filename("cn_deletions.bed"),
        strat.deletions.iter().map(|x| x.region()),
        "copy number deletion segments",
    );
    write_region_bed(
        output_dir,
        &filename("cn_normal.bed"),
        strat.normal.iter().map(|x| x.region()),
        "copy number normal segments",
    );
    write_region_bed(
        output_dir,
        &filename("copy_loss.bed"),
        &overlay.copy_loss,
        "copy-loss track",
    );
    write_region_bed(
        output_dir,
        &filename("cnloh_candidates.bed"),
        &overlay.cnloh_candidates,
        "cnLoH candidate track",
    );

    let run_stats = SingleRunStats {
        sample_name: prefix.to_string(),
        roh_filter: FilterStats {
            input_count: roh_input.records.len(),
            significant_count: roh.len(),
        },
        cn_filter: FilterStats {
            input_count: cn_input.records.len(),
            significant_count: cn.len(),
        },
        roh_input: roh_input.stats,
        cn_input: cn_input.stats,
        cn_cohorts: CopyNumberCohortStats {
            deletion_count: strat.deletions.len(),
            normal_count: strat.normal.len(),
            mixed_count: None,
            amplification_count: strat.amplifications.len(),
        },
        overlap_summary,
        cnv_size_classes,
        cnloh_overlay: CnlohOverlayStats {
            copy_loss_count: overlay.copy_loss.len(),
            cnloh_candidate_count: overlay.cnloh_candidates.len(),
        },
    };
    write_run_stats(output_dir, &run_stats);

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::scored_region::test_utils::*;

    #[test]
    fn test_check_single_inputs() {
        let roh = vec![get_test_roh("chr1", 1000, 5000, 20.0)];
        let cn = vec![get_test_cn("chr1", 2000, 3000, 2, 20.0)];
        let no_roh = Vec::<RohRegion>::new();
        let no_cn = Vec::<CnSegment>::new();

        assert!(check_single_inputs(&no_roh, &no_cn).is_err());
        assert!(check_single_inputs(&roh, &no_cn).is_ok());
        assert!(check_single_inputs(&no_roh, &cn).is_ok());
        assert!(check_single_inputs(&roh, &cn).is_ok());
    }

    #[test]
    fn test_run_single_without_inputs() {
        let settings =
            cli::Settings::try_parse_from(["lohscan", "single", "--sample", "s1"]).unwrap();
        match &settings.command {
            cli::Commands::Single(x) => assert!(run_single(&settings.shared, x).is_err()),
            cli::Commands::Paired(_) => panic!("unexpected command"),
        }
    }
}
