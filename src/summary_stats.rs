//! Region cohort statistics and summary tables
//!

use serde::Serialize;
use strum::{AsRefStr, Display, IntoEnumIterator};

use crate::event_classifier::{ClassifiedOverlap, EventType};
use crate::genome_region::{GenomicRegion, merge_chrom_regions};
use crate::overlap::{get_chrom_order, group_by_chrom};
use crate::scored_region::{CnSegment, CnSegmentPaired, Scored};
use crate::stratify::CopyNumberClass;

/// Count and length summary of a region collection
///
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct RegionStats {
    pub count: usize,
    pub total_length: i64,

    /// Zero for an empty collection
    pub mean_length: f64,
}

impl RegionStats {
    pub fn aggregate<'a>(regions: impl IntoIterator<Item = &'a GenomicRegion>) -> Self {
        let (count, total_length) = regions
            .into_iter()
            .fold((0usize, 0i64), |(count, total), x| (count + 1, total + x.length()));
        let mean_length = if count > 0 {
            total_length as f64 / count as f64
        } else {
            0.0
        };
        Self {
            count,
            total_length,
            mean_length,
        }
    }

    pub fn from_records<T: Scored>(records: &[T]) -> Self {
        Self::aggregate(records.iter().map(|x| x.region()))
    }
}

/// Percent of the reference length covered by the overlap length, zero when the reference is empty
///
pub fn coverage_percent(overlap_length: i64, reference_total_length: i64) -> f64 {
    if reference_total_length > 0 {
        overlap_length as f64 / reference_total_length as f64 * 100.0
    } else {
        0.0
    }
}

/// Merge two record collections into a single set of non-overlapping regions
///
/// Overlapping or touching regions are merged within each chromosome. Chromosomes are reported in
/// order of first appearance, with each chromosome's regions sorted by position.
///
pub fn get_union_regions<A: Scored, B: Scored>(a: &[A], b: &[B]) -> Vec<GenomicRegion> {
    let chrom_order = get_chrom_order(a, b);
    let a_chroms = group_by_chrom(a);
    let b_chroms = group_by_chrom(b);

    let mut union = Vec::new();
    for chrom in chrom_order {
        let chrom_regions = a_chroms
            .get(chrom)
            .into_iter()
            .flatten()
            .map(|x| x.region().clone())
            .chain(
                b_chroms
                    .get(chrom)
                    .into_iter()
                    .flatten()
                    .map(|x| x.region().clone()),
            )
            .collect::<Vec<_>>();
        union.extend(merge_chrom_regions(&chrom_regions));
    }
    union
}

#[derive(AsRefStr, Clone, Copy, Debug, Display, Eq, PartialEq, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Cohort {
    Roh,
    Cn,
    Union,
    CnDeletions,
    CnNormal,
}

#[derive(Clone, Debug, Serialize)]
pub struct CohortStats {
    pub cohort: Cohort,
    #[serde(flatten)]
    pub stats: RegionStats,
}

/// Cohort statistics and bidirectional overlap coverage for one ROH/CN comparison
///
#[derive(Clone, Debug, Serialize)]
pub struct OverlapSummary {
    pub cohorts: Vec<CohortStats>,
    pub overlap_count: usize,
    pub overlap_total_length: i64,
    pub roh_covered_by_cn_percent: f64,
    pub cn_covered_by_roh_percent: f64,
}

impl OverlapSummary {
    pub fn get_cohort(&self, cohort: Cohort) -> Option<&RegionStats> {
        self.cohorts
            .iter()
            .find(|x| x.cohort == cohort)
            .map(|x| &x.stats)
    }
}

/// Summarize the ROH and CN cohorts used for overlap analysis
///
/// # Arguments
///
/// * `roh` - ROH regions used in the overlap
/// * `cn_deletions` - CN deletion cohort
/// * `cn_normal` - CN normal cohort
/// * `overlap_count` - Number of ROH/CN overlap records
/// * `overlap_total_length` - Summed length of all ROH/CN overlap records
///
/// The CN cohort is the union of the deletion and normal cohorts, which is the full set of CN
/// segments eligible for LoH analysis.
///
pub fn get_overlap_summary<A: Scored, B: Scored>(
    roh: &[A],
    cn_deletions: &[B],
    cn_normal: &[B],
    overlap_count: usize,
    overlap_total_length: i64,
) -> OverlapSummary {
    let roh_stats = RegionStats::from_records(roh);
    let cn_stats = RegionStats::aggregate(
        cn_deletions
            .iter()
            .chain(cn_normal.iter())
            .map(|x| x.region()),
    );

    let cn_universe = cn_deletions
        .iter()
        .chain(cn_normal.iter())
        .map(|x| x.scored())
        .cloned()
        .collect::<Vec<_>>();
    let union = get_union_regions(roh, &cn_universe);
    let union_stats = RegionStats::aggregate(&union);

    let cohorts = vec![
        CohortStats {
            cohort: Cohort::Roh,
            stats: roh_stats,
        },
        CohortStats {
            cohort: Cohort::Cn,
            stats: cn_stats,
        },
        CohortStats {
            cohort: Cohort::Union,
            stats: union_stats,
        },
        CohortStats {
            cohort: Cohort::CnDeletions,
            stats: RegionStats::from_records(cn_deletions),
        },
        CohortStats {
            cohort: Cohort::CnNormal,
            stats: RegionStats::from_records(cn_normal),
        },
    ];

    OverlapSummary {
        cohorts,
        overlap_count,
        overlap_total_length,
        roh_covered_by_cn_percent: coverage_percent(overlap_total_length, roh_stats.total_length),
        cn_covered_by_roh_percent: coverage_percent(overlap_total_length, cn_stats.total_length),
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EventSummary {
    pub event_type: String,
    pub count: usize,
    pub total_length: i64,
}

/// Count and total length of classified overlaps for each event type
///
/// Event types are reported in vocabulary order, and event types without any overlaps are omitted.
///
pub fn get_event_summary(overlaps: &[ClassifiedOverlap]) -> Vec<EventSummary> {
    EventType::iter()
        .filter_map(|event_type| {
            let stats = RegionStats::aggregate(
                overlaps
                    .iter()
                    .filter(|x| x.event_type == event_type)
                    .map(|x| &x.region),
            );
            if stats.count == 0 {
                None
            } else {
                Some(EventSummary {
                    event_type: event_type.to_string(),
                    count: stats.count,
                    total_length: stats.total_length,
                })
            }
        })
        .collect()
}

/// Direction of a copy number change for size-class reporting
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CnvChange {
    Loss,
    Gain,
    Neutral,
}

impl CnvChange {
    /// Change of a single-sample segment relative to the normal copy number
    pub fn from_segment(segment: &CnSegment, normal_copy_number: i32) -> Self {
        match CopyNumberClass::from_copy_number(segment.copy_number, normal_copy_number) {
            CopyNumberClass::Deletion => CnvChange::Loss,
            CopyNumberClass::Normal => CnvChange::Neutral,
            CopyNumberClass::Amplification => CnvChange::Gain,
        }
    }

    /// Change from the pre to the post sample of a paired segment
    pub fn from_paired_segment(segment: &CnSegmentPaired) -> Self {
        use std::cmp::Ordering;
        match segment.copy_number_post.cmp(&segment.copy_number_pre) {
            Ordering::Less => CnvChange::Loss,
            Ordering::Equal => CnvChange::Neutral,
            Ordering::Greater => CnvChange::Gain,
        }
    }
}

pub const CNV_SIZE_CLASS_SMALL: i64 = 200_000;
pub const CNV_SIZE_CLASS_LARGE: i64 = 1_000_000;

/// Counts of copy number losses and gains above each size class threshold
///
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct CnvSizeClassCounts {
    pub deletions_over_200kb: usize,
    pub deletions_over_1mb: usize,
    pub duplications_over_200kb: usize,
    pub duplications_over_1mb: usize,
}

impl CnvSizeClassCounts {
    fn add(&mut self, length: i64, change: CnvChange) {
        let (over_small, over_large) = match change {
            CnvChange::Loss => (&mut self.deletions_over_200kb, &mut self.deletions_over_1mb),
            CnvChange::Gain => (
                &mut self.duplications_over_200kb,
                &mut self.duplications_over_1mb,
            ),
            CnvChange::Neutral => return,
        };
        if length > CNV_SIZE_CLASS_SMALL {
            *over_small += 1;
        }
        if length > CNV_SIZE_CLASS_LARGE {
            *over_large += 1;
        }
    }

    pub fn from_changes(changes: impl IntoIterator<Item = (i64, CnvChange)>) -> Self {
        let mut counts = Self::default();
        for (length, change) in changes {
            counts.add(length, change);
        }
        counts
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct CnvSizeClassSummary {
    pub all: CnvSizeClassCounts,
    pub significant: CnvSizeClassCounts,
}

pub fn get_single_cnv_size_classes(
    all_segments: &[CnSegment],
    significant_segments: &[CnSegment],
    normal_copy_number: i32,
) -> CnvSizeClassSummary {
    let counts = |segments: &[CnSegment]| {
        CnvSizeClassCounts::from_changes(segments.iter().map(|x| {
            (
                x.region().length(),
                CnvChange::from_segment(x, normal_copy_number),
            )
        }))
    };
    CnvSizeClassSummary {
        all: counts(all_segments),
        significant: counts(significant_segments),
    }
}

pub fn get_paired_cnv_size_classes(
    all_segments: &[CnSegmentPaired],
    significant_segments: &[CnSegmentPaired],
) -> CnvSizeClassSummary {
    let counts = |segments: &[CnSegmentPaired]| {
        CnvSizeClassCounts::from_changes(
            segments
                .iter()
                .map(|x| (x.region().length(), CnvChange::from_paired_segment(x))),
        )
    };
    CnvSizeClassSummary {
        all: counts(all_segments),
        significant: counts(significant_segments),
    }
}
