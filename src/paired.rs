use camino::Utf8Path;
use log::info;
use simple_error::{SimpleResult, bail};
use strum::IntoEnumIterator;
use thousands::Separable;

use crate::cli::defaults::{COPY_LOSS_COPY_NUMBER, NORMAL_COPY_NUMBER};
use crate::cli::{self, PairedSettings};
use crate::cnloh_overlay::{CnlohOverlay, get_cnloh_overlay};
use crate::event_classifier::classify_paired_overlaps;
use crate::overlap::{get_total_overlap_length, overlap_rows};
use crate::read_inputs::{
    InputReadStats, InputRecords, open_input_file, read_differential_roh, read_paired_cn_summary,
    read_single_cn_summary,
};
use crate::region_filter::filter_significant;
use crate::run_stats::{
    CnlohOverlayStats, CopyNumberCohortStats, FilterStats, PairedRunStats, RohStatusStats,
    write_run_stats,
};
use crate::scored_region::{CnSegment, CnSegmentPaired, RohRegion, RohStatus, Scored};
use crate::stratify::{get_paired_loh_universe, stratify_paired};
use crate::summary_stats::{
    Cohort, get_event_summary, get_overlap_summary, get_paired_cnv_size_classes,
};
use crate::write_outputs::{
    write_classified_overlaps, write_cnv_size_classes, write_event_summary, write_region_bed,
    write_summary_stats,
};

fn read_paired_roh(settings: &PairedSettings) -> InputRecords<Vec<RohRegion>> {
    match &settings.roh_filename {
        Some(filename) => read_differential_roh(open_input_file(filename), filename.as_str()),
        None => {
            info!("No differential ROH input given");
            InputRecords {
                records: Vec::new(),
                stats: InputReadStats::default(),
            }
        }
    }
}

fn read_paired_cn(settings: &PairedSettings) -> InputRecords<Vec<CnSegmentPaired>> {
    match &settings.cn_summary_filename {
        Some(filename) => read_paired_cn_summary(
            open_input_file(filename),
            settings.pre_sample.as_deref(),
            settings.post_sample.as_deref(),
            filename.as_str(),
        ),
        None => {
            info!("No paired copy number summary input given");
            InputRecords {
                records: Vec::new(),
                stats: InputReadStats::default(),
            }
        }
    }
}

/// Read an independent single-sample copy number summary for one side of the pair
///
fn read_side_cn(filename: Option<&Utf8Path>) -> Option<InputRecords<Vec<CnSegment>>> {
    filename.map(|x| read_single_cn_summary(open_input_file(x), x.as_str()))
}

/// Fail the run if no ROH regions or copy number segments were read from any input
///
fn check_paired_inputs(
    roh: &[RohRegion],
    cn: &[CnSegmentPaired],
    pre_cn: Option<&[CnSegment]>,
    post_cn: Option<&[CnSegment]>,
) -> SimpleResult<()> {
    let is_side_empty = |x: Option<&[CnSegment]>| x.is_none_or(|x| x.is_empty());
    if roh.is_empty() && cn.is_empty() && is_side_empty(pre_cn) && is_side_empty(post_cn) {
        bail!("No ROH regions or copy number segments found in any input");
    }
    Ok(())
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum PairSide {
    Pre,
    Post,
}

impl PairSide {
    fn label(&self) -> &'static str {
        match self {
            PairSide::Pre => "pre",
            PairSide::Post => "post",
        }
    }

    /// True if a ROH with this status is homozygous in this sample
    fn has_roh(&self, status: RohStatus) -> bool {
        match self {
            PairSide::Pre => status.in_pre(),
            PairSide::Post => status.in_post(),
        }
    }

    fn get_segment(&self, segment: &CnSegmentPaired) -> CnSegment {
        match self {
            PairSide::Pre => segment.to_pre_segment(),
            PairSide::Post => segment.to_post_segment(),
        }
    }
}

/// Build the copy-loss and cnLoH candidate sets for one side of the pair
///
/// ROH regions are selected by whether their status makes them homozygous in this sample. The
/// independent single-sample segments for this side are used when available, otherwise the
/// segments are projected from the paired call set.
///
fn get_side_cnloh_overlay(
    side: PairSide,
    roh: &[RohRegion],
    paired_cn: &[CnSegmentPaired],
    side_cn: Option<&[CnSegment]>,
    debug: bool,
) -> CnlohOverlay {
    let side_roh = roh
        .iter()
        .filter(|x| x.status.is_some_and(|s| side.has_roh(s)))
        .cloned()
        .collect::<Vec<_>>();
    let side_cn = match side_cn {
        Some(x) => x.to_vec(),
        None => paired_cn.iter().map(|x| side.get_segment(x)).collect(),
    };
    get_cnloh_overlay(
        &side_roh,
        &side_cn,
        COPY_LOSS_COPY_NUMBER,
        NORMAL_COPY_NUMBER,
        debug,
    )
}

fn get_overlay_stats(overlay: &CnlohOverlay) -> CnlohOverlayStats {
    CnlohOverlayStats {
        copy_loss_count: overlay.copy_loss.len(),
        cnloh_candidate_count: overlay.cnloh_candidates.len(),
    }
}

fn get_roh_status_stats(roh_input: &[RohRegion], roh: &[RohRegion]) -> Vec<RohStatusStats> {
    let count = |regions: &[RohRegion], status: RohStatus| {
        regions
            .iter()
            .filter(|x| x.status == Some(status))
            .count()
    };
    RohStatus::iter()
        .map(|status| RohStatusStats {
            status: status.to_string(),
            input_count: count(roh_input, status),
            significant_count: count(roh, status),
        })
        .collect()
}

/// Classify LoH changes between the pre and post samples of a pair
///
pub fn run_paired(
    shared_settings: &cli::SharedSettings,
    settings: &PairedSettings,
) -> SimpleResult<()> {
    let roh_input = read_paired_roh(settings);
    let cn_input = read_paired_cn(settings);
    let pre_cn_input = read_side_cn(settings.pre_cn_summary_filename.as_deref());
    let post_cn_input = read_side_cn(settings.post_cn_summary_filename.as_deref());
    let pre_cn = pre_cn_input.as_ref().map(|x| x.records.as_slice());
    let post_cn = post_cn_input.as_ref().map(|x| x.records.as_slice());
    check_paired_inputs(&roh_input.records, &cn_input.records, pre_cn, post_cn)?;

    cli::write_paired_settings(&settings.output_dir, settings);

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
        "Significant differential ROH regions: {} of {}",
        roh.len().separate_with_commas(),
        roh_input.records.len().separate_with_commas()
    );
    info!(
        "Significant paired copy number segments: {} of {}",
        cn.len().separate_with_commas(),
        cn_input.records.len().separate_with_commas()
    );

    let roh_status = get_roh_status_stats(&roh_input.records, &roh);
    for x in roh_status.iter() {
        info!(
            "ROH status {}: {} significant of {}",
            x.status,
            x.significant_count.separate_with_commas(),
            x.input_count.separate_with_commas()
        );
    }

    let strat = stratify_paired(&cn, NORMAL_COPY_NUMBER);
    let cn_universe = get_paired_loh_universe(&cn, NORMAL_COPY_NUMBER);
    info!(
        "Copy number segments for LoH analysis: {} ({} deletions including {} mixed, {} normal). Excluded amplifications: {}",
        cn_universe.len().separate_with_commas(),
        strat.deletions.len().separate_with_commas(),
        strat.mixed.len().separate_with_commas(),
        strat.normal.len().separate_with_commas(),
        strat.amplifications.len().separate_with_commas()
    );

    let (classified, overlap_summary, pre_overlay, post_overlay) = worker_pool.install(|| {
        let overlaps = overlap_rows(&roh, &cn_universe);
        let classified = classify_paired_overlaps(&overlaps, NORMAL_COPY_NUMBER);
        let overlap_summary = get_overlap_summary(
            &roh,
            &strat.deletions,
            &strat.normal,
            overlaps.len(),
            get_total_overlap_length(&overlaps),
        );
        let debug = shared_settings.debug_cnloh_overlay;
        let pre_overlay =
            get_side_cnloh_overlay(PairSide::Pre, &roh, &cn_input.records, pre_cn, debug);
        let post_overlay =
            get_side_cnloh_overlay(PairSide::Post, &roh, &cn_input.records, post_cn, debug);
        (classified, overlap_summary, pre_overlay, post_overlay)
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

    let event_summary = get_event_summary(&classified);
    let cnv_size_classes = get_paired_cnv_size_classes(&cn_input.records, &cn);

    write_classified_overlaps(output_dir, &filename("overlaps.tsv"), &classified, true);
    write_event_summary(output_dir, &filename("event_summary.tsv"), &event_summary);
    write_summary_stats(output_dir, &filename("summary_stats.tsv"), &overlap_summary);
    write_cnv_size_classes(
        output_dir,
        &filename("cnv_size_classes.tsv"),
        &cnv_size_classes,
    );

    for status in RohStatus::iter() {
        write_region_bed(
            output_dir,
            &filename(&format!("{}.filtered.bed", status.file_label())),
            roh.iter()
                .filter(|x| x.status == Some(status))
                .map(|x| x.region()),
            &format!("significant {status} ROH regions"),
        );
    }

    for (side, overlay) in [(PairSide::Pre, &pre_overlay), (PairSide::Post, &post_overlay)] {
        let side = side.label();
        write_region_bed(
            output_dir,
            &filename(&format!("{side}.copy_loss.bed")),
            &overlay.copy_loss,
            &format!("{side} sample copy-loss track"),
        );
        write_region_bed(
            output_dir,
            &filename(&format!("{side}.cnloh_candidates.bed")),
            &overlay.cnloh_candidates,
            &format!("{side} sample cnLoH candidate track"),
        );
    }

    let run_stats = PairedRunStats {
        pre_sample_name: settings.get_pre_label().to_string(),
        post_sample_name: settings.get_post_label().to_string(),
        roh_filter: FilterStats {
            input_count: roh_input.records.len(),
            significant_count: roh.len(),
        },
        roh_status,
        cn_filter: FilterStats {
            input_count: cn_input.records.len(),
            significant_count: cn.len(),
        },
        roh_input: roh_input.stats,
        cn_input: cn_input.stats,
        pre_cn_input: pre_cn_input.map(|x| x.stats),
        post_cn_input: post_cn_input.map(|x| x.stats),
        cn_cohorts: CopyNumberCohortStats {
            deletion_count: strat.deletions.len(),
            normal_count: strat.normal.len(),
            mixed_count: Some(strat.mixed.len()),
            amplification_count: strat.amplifications.len(),
        },
        overlap_summary,
        event_summary,
        cnv_size_classes,
        pre_cnloh_overlay: get_overlay_stats(&pre_overlay),
        post_cnloh_overlay: get_overlay_stats(&post_overlay),
    };
    write_run_stats(output_dir, &run_stats);

    Ok(())
}
