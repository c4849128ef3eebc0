//! Partition copy number segments into deletion, normal and amplification cohorts
//!

use std::cmp::Ordering;

use strum::{AsRefStr, Display};

use crate::scored_region::{CnSegment, CnSegmentPaired};

/// Copy number state relative to the normal copy number
#[derive(AsRefStr, Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum CopyNumberClass {
    Deletion,
    Normal,
    Amplification,
}

impl CopyNumberClass {
    pub fn from_copy_number(copy_number: i32, normal_copy_number: i32) -> Self {
        match copy_number.cmp(&normal_copy_number) {
            Ordering::Less => CopyNumberClass::Deletion,
            Ordering::Equal => CopyNumberClass::Normal,
            Ordering::Greater => CopyNumberClass::Amplification,
        }
    }

    /// Joint class for a paired segment
    ///
    /// A loss on either side makes a deletion, both sides must be normal for the normal class, and
    /// everything else is an amplification.
    ///
    pub fn from_paired_copy_number(
        copy_number_pre: i32,
        copy_number_post: i32,
        normal_copy_number: i32,
    ) -> Self {
        if copy_number_pre < normal_copy_number || copy_number_post < normal_copy_number {
            CopyNumberClass::Deletion
        } else if copy_number_pre == normal_copy_number && copy_number_post == normal_copy_number {
            CopyNumberClass::Normal
        } else {
            CopyNumberClass::Amplification
        }
    }

    /// True for the classes that can support an LoH event
    pub fn is_loh_candidate(&self) -> bool {
        matches!(self, CopyNumberClass::Deletion | CopyNumberClass::Normal)
    }
}

/// Return true if exactly one side of the pair is normal and the other side is a loss
pub fn is_mixed_copy_number(
    copy_number_pre: i32,
    copy_number_post: i32,
    normal_copy_number: i32,
) -> bool {
    (copy_number_pre == normal_copy_number && copy_number_post < normal_copy_number)
        || (copy_number_post == normal_copy_number && copy_number_pre < normal_copy_number)
}

pub struct SingleStratification {
    pub deletions: Vec<CnSegment>,
    pub normal: Vec<CnSegment>,
    pub amplifications: Vec<CnSegment>,
}

impl SingleStratification {
    pub fn total_count(&self) -> usize {
        self.deletions.len() + self.normal.len() + self.amplifications.len()
    }
}

/// Stratify single-sample segments by copy number, preserving input order within each cohort
///
pub fn stratify_single(segments: &[CnSegment], normal_copy_number: i32) -> SingleStratification {
    let mut strat = SingleStratification {
        deletions: Vec::new(),
        normal: Vec::new(),
        amplifications: Vec::new(),
    };
    for segment in segments.iter() {
        let cohort = match CopyNumberClass::from_copy_number(segment.copy_number, normal_copy_number)
        {
            CopyNumberClass::Deletion => &mut strat.deletions,
            CopyNumberClass::Normal => &mut strat.normal,
            CopyNumberClass::Amplification => &mut strat.amplifications,
        };
        cohort.push(segment.clone());
    }
    strat
}

pub struct PairedStratification {
    pub deletions: Vec<CnSegmentPaired>,
    pub normal: Vec<CnSegmentPaired>,

    /// Subset of `deletions` where one side is normal
    pub mixed: Vec<CnSegmentPaired>,

    /// Segments outside of the LoH universe, where neither side is a loss and at least one side is
    /// a gain
    pub amplifications: Vec<CnSegmentPaired>,
}

/// Stratify paired segments by the joint copy number of both samples
///
pub fn stratify_paired(
    segments: &[CnSegmentPaired],
    normal_copy_number: i32,
) -> PairedStratification {
    let mut strat = PairedStratification {
        deletions: Vec::new(),
        normal: Vec::new(),
        mixed: Vec::new(),
        amplifications: Vec::new(),
    };
    for segment in segments.iter() {
        let (pre, post) = (segment.copy_number_pre, segment.copy_number_post);
        match CopyNumberClass::from_paired_copy_number(pre, post, normal_copy_number) {
            CopyNumberClass::Deletion => {
                if is_mixed_copy_number(pre, post, normal_copy_number) {
                    strat.mixed.push(segment.clone());
                }
                strat.deletions.push(segment.clone());
            }
            CopyNumberClass::Normal => strat.normal.push(segment.clone()),
            CopyNumberClass::Amplification => strat.amplifications.push(segment.clone()),
        }
    }
    strat
}

/// Get the segments eligible for LoH analysis (the deletion and normal cohorts), in input order
///
pub fn get_single_loh_universe(segments: &[CnSegment], normal_copy_number: i32) -> Vec<CnSegment> {
    segments
        .iter()
        .filter(|x| {
            CopyNumberClass::from_copy_number(x.copy_number, normal_copy_number).is_loh_candidate()
        })
        .cloned()
        .collect()
}

/// Get the paired segments eligible for LoH analysis (the deletion and normal cohorts), in input order
///
pub fn get_paired_loh_universe(
    segments: &[CnSegmentPaired],
    normal_copy_number: i32,
) -> Vec<CnSegmentPaired> {
    segments
        .iter()
        .filter(|x| {
            CopyNumberClass::from_paired_copy_number(
                x.copy_number_pre,
                x.copy_number_post,
                normal_copy_number,
            )
            .is_loh_candidate()
        })
        .cloned()
        .collect()
}
