//! Classify ROH/CN overlaps into LoH event types
//!

use strum::{AsRefStr, Display, EnumIter};

use crate::genome_region::GenomicRegion;
use crate::overlap::OverlapRecord;
use crate::scored_region::{CnSegment, CnSegmentPaired, RohRegion, RohStatus};
use crate::stratify::CopyNumberClass;

/// Fixed vocabulary of LoH event labels
///
/// Declaration order is used as the report order in event summaries.
///
#[derive(AsRefStr, Clone, Copy, Debug, Display, EnumIter, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum EventType {
    // ROH new in post sample
    #[strum(serialize = "cnLoH (copy-neutral Loss of Heterozygosity)")]
    CopyNeutralLoh,
    #[strum(serialize = "Copy-number restoration with maintained LoH")]
    CnRestorationMaintainedLoh,
    #[strum(serialize = "Copy-number loss with acquired LoH")]
    CnLossAcquiredLoh,
    #[strum(serialize = "Copy-number loss with maintained LoH")]
    CnLossMaintainedLoh,
    #[strum(serialize = "Copy-number gain with acquired LoH")]
    CnGainAcquiredLoh,
    #[strum(serialize = "Complex copy-number change with acquired LoH")]
    ComplexAcquiredLoh,

    // ROH lost in post sample
    #[strum(serialize = "Restored heterozygosity (normal CN)")]
    RestoredHeterozygosity,
    #[strum(serialize = "Copy-number restoration with gained heterozygosity")]
    CnRestorationGainedHeterozygosity,
    #[strum(serialize = "Copy-number loss with maintained heterozygosity")]
    CnLossMaintainedHeterozygosity,
    #[strum(serialize = "Copy-number gain with gained heterozygosity")]
    CnGainGainedHeterozygosity,
    #[strum(serialize = "Complex copy-number change with lost LoH")]
    ComplexLostLoh,

    // ROH unchanged
    #[strum(serialize = "Stable LoH with normal CN (potential technical variation)")]
    StableLohNormalCnVariation,
    #[strum(serialize = "Copy-number change with stable LoH")]
    CnChangeStableLoh,
    #[strum(serialize = "Complex CN change with stable LoH")]
    ComplexStableLoh,
    #[strum(serialize = "Stable cnLoH (copy-neutral)")]
    StableCopyNeutralLoh,
    #[strum(serialize = "Stable deletion-associated LoH")]
    StableDeletionLoh,
    #[strum(serialize = "Stable amplification-associated LoH")]
    StableAmplificationLoh,

    // Single sample
    #[strum(serialize = "Deletion-associated LoH")]
    DeletionLoh,
    #[strum(serialize = "Candidate copy-neutral LoH (cnLoH)")]
    CandidateCopyNeutralLoh,
    #[strum(serialize = "Copy-gain with LoH")]
    CopyGainLoh,
}

/// Classify the event type of a paired ROH/CN overlap
///
/// Rules are evaluated in order within each ROH status, so the final rule of each status is the
/// fallback for all remaining copy number combinations.
///
pub fn classify_paired_event(
    status: RohStatus,
    copy_number_pre: i32,
    copy_number_post: i32,
    normal_copy_number: i32,
) -> EventType {
    use EventType::*;

    let n = normal_copy_number;
    let (pre, post) = (copy_number_pre, copy_number_post);
    match status {
        RohStatus::NewInPost => {
            if post == n && pre == n {
                CopyNeutralLoh
            } else if post == n && pre < n {
                CnRestorationMaintainedLoh
            } else if post < n && pre == n {
                CnLossAcquiredLoh
            } else if post < n && pre < n {
                CnLossMaintainedLoh
            } else if post > n {
                CnGainAcquiredLoh
            } else {
                ComplexAcquiredLoh
            }
        }
        RohStatus::LostInPost => {
            if post == n && pre == n {
                RestoredHeterozygosity
            } else if post == n && pre < n {
                CnRestorationGainedHeterozygosity
            } else if post < n && pre == n {
                CnLossMaintainedHeterozygosity
            } else if post > n {
                CnGainGainedHeterozygosity
            } else {
                ComplexLostLoh
            }
        }
        RohStatus::Unchanged => {
            if post != pre {
                if post == n && pre == n {
                    StableLohNormalCnVariation
                } else if (post == n) != (pre == n) {
                    CnChangeStableLoh
                } else {
                    ComplexStableLoh
                }
            } else if post == n {
                StableCopyNeutralLoh
            } else if post < n {
                StableDeletionLoh
            } else {
                StableAmplificationLoh
            }
        }
    }
}

/// Classify the event type of a single-sample ROH/CN overlap, which depends on copy number only
///
/// Single-sample overlaps are only taken against the deletion and normal cohorts, so the
/// amplification arm is not reached in a run. It keeps the classifier total over all copy numbers.
///
pub fn classify_single_event(copy_number: i32, normal_copy_number: i32) -> EventType {
    match CopyNumberClass::from_copy_number(copy_number, normal_copy_number) {
        CopyNumberClass::Deletion => EventType::DeletionLoh,
        CopyNumberClass::Normal => EventType::CandidateCopyNeutralLoh,
        CopyNumberClass::Amplification => EventType::CopyGainLoh,
    }
}

/// Copy number of the CN segment underlying an overlap
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OverlapCopyNumber {
    Single(i32),
    Paired { pre: i32, post: i32 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct ClassifiedOverlap {
    pub region: GenomicRegion,
    pub status: Option<RohStatus>,
    pub copy_number: OverlapCopyNumber,
    pub event_type: EventType,
}

pub fn classify_single_overlaps(
    overlaps: &[OverlapRecord<RohRegion, CnSegment>],
    normal_copy_number: i32,
) -> Vec<ClassifiedOverlap> {
    overlaps
        .iter()
        .map(|x| ClassifiedOverlap {
            region: x.region.clone(),
            status: None,
            copy_number: OverlapCopyNumber::Single(x.b.copy_number),
            event_type: classify_single_event(x.b.copy_number, normal_copy_number),
        })
        .collect()
}

/// Classify paired overlaps
///
/// ROH records without a status cannot be classified, and are skipped.
///
pub fn classify_paired_overlaps(
    overlaps: &[OverlapRecord<RohRegion, CnSegmentPaired>],
    normal_copy_number: i32,
) -> Vec<ClassifiedOverlap> {
    overlaps
        .iter()
        .filter_map(|x| {
            let status = x.a.status?;
            let (pre, post) = (x.b.copy_number_pre, x.b.copy_number_post);
            Some(ClassifiedOverlap {
                region: x.region.clone(),
                status: Some(status),
                copy_number: OverlapCopyNumber::Paired { pre, post },
                event_type: classify_paired_event(status, pre, post, normal_copy_number),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;
    use crate::overlap::overlap_rows;
    use crate::scored_region::test_utils::*;
    use crate::stratify::get_single_loh_universe;

    const NORMAL: i32 = 2;

    #[test]
    fn test_paired_classifier_is_total() {
        for status in RohStatus::iter() {
            for pre in 0..5 {
                for post in 0..5 {
                    let event = classify_paired_event(status, pre, post, NORMAL);
                    assert!(!event.to_string().is_empty());
                }
            }
        }
    }

    #[test]
    fn test_new_in_post_table() {
        use EventType::*;
        let c = |pre, post| classify_paired_event(RohStatus::NewInPost, pre, post, NORMAL);
        assert_eq!(c(2, 2), CopyNeutralLoh);
        assert_eq!(c(1, 2), CnRestorationMaintainedLoh);
        assert_eq!(c(2, 1), CnLossAcquiredLoh);
        assert_eq!(c(1, 0), CnLossMaintainedLoh);
        assert_eq!(c(0, 3), CnGainAcquiredLoh);
        assert_eq!(c(3, 1), ComplexAcquiredLoh);
        assert_eq!(c(3, 2), ComplexAcquiredLoh);
    }

    #[test]
    fn test_lost_in_post_table() {
        use EventType::*;
        let c = |pre, post| classify_paired_event(RohStatus::LostInPost, pre, post, NORMAL);
        assert_eq!(c(2, 2), RestoredHeterozygosity);
        assert_eq!(c(0, 2), CnRestorationGainedHeterozygosity);
        assert_eq!(c(2, 1), CnLossMaintainedHeterozygosity);
        assert_eq!(c(1, 4), CnGainGainedHeterozygosity);
        assert_eq!(c(1, 1), ComplexLostLoh);
        assert_eq!(c(3, 0), ComplexLostLoh);
    }

    #[test]
    fn test_unchanged_table() {
        use EventType::*;
        let c = |pre, post| classify_paired_event(RohStatus::Unchanged, pre, post, NORMAL);
        assert_eq!(c(2, 2), StableCopyNeutralLoh);
        assert_eq!(c(1, 1), StableDeletionLoh);
        assert_eq!(c(3, 3), StableAmplificationLoh);
        assert_eq!(c(2, 1), CnChangeStableLoh);
        assert_eq!(c(3, 2), CnChangeStableLoh);
        assert_eq!(c(1, 3), ComplexStableLoh);
        assert_eq!(c(0, 1), ComplexStableLoh);
    }

    #[test]
    fn test_event_labels() {
        assert_eq!(
            EventType::CopyNeutralLoh.to_string(),
            "cnLoH (copy-neutral Loss of Heterozygosity)"
        );
        assert_eq!(
            EventType::CnLossMaintainedLoh.to_string(),
            "Copy-number loss with maintained LoH"
        );
        assert_eq!(
            EventType::StableLohNormalCnVariation.as_ref(),
            "Stable LoH with normal CN (potential technical variation)"
        );
    }

    #[test]
    fn test_classify_single_event() {
        assert_eq!(classify_single_event(0, NORMAL), EventType::DeletionLoh);
        assert_eq!(classify_single_event(1, NORMAL), EventType::DeletionLoh);
        assert_eq!(
            classify_single_event(2, NORMAL),
            EventType::CandidateCopyNeutralLoh
        );
        assert_eq!(classify_single_event(5, NORMAL), EventType::CopyGainLoh);
    }

    #[test]
    fn test_single_overlaps_exclude_amplifications() {
        let roh = vec![get_test_roh("chr1", 0, 10_000, 20.0)];
        let cn = vec![
            get_test_cn("chr1", 0, 1000, 1, 20.0),
            get_test_cn("chr1", 1000, 2000, 3, 20.0),
            get_test_cn("chr1", 2000, 3000, 2, 20.0),
        ];
        let cn_universe = get_single_loh_universe(&cn, NORMAL);
        let classified = classify_single_overlaps(&overlap_rows(&roh, &cn_universe), NORMAL);

        let event_types = classified.iter().map(|x| x.event_type).collect::<Vec<_>>();
        assert_eq!(
            event_types,
            vec![EventType::DeletionLoh, EventType::CandidateCopyNeutralLoh]
        );
    }

    #[test]
    fn test_classify_paired_overlaps() {
        let roh = vec![get_test_paired_roh(
            "chr2",
            100,
            200,
            20.0,
            RohStatus::NewInPost,
        )];

        let cn = vec![get_test_paired_cn("chr2", 150, 180, 2, 2, 15.0)];
        let classified = classify_paired_overlaps(&overlap_rows(&roh, &cn), NORMAL);
        assert_eq!(classified.len(), 1);
        assert_eq!(classified[0].region.start(), 150);
        assert_eq!(classified[0].region.end(), 180);
        assert_eq!(
            classified[0].event_type.to_string(),
            "cnLoH (copy-neutral Loss of Heterozygosity)"
        );

        let cn = vec![get_test_paired_cn("chr2", 150, 180, 1, 1, 15.0)];
        let classified = classify_paired_overlaps(&overlap_rows(&roh, &cn), NORMAL);
        assert_eq!(classified.len(), 1);
        assert_eq!(
            classified[0].event_type.to_string(),
            "Copy-number loss with maintained LoH"
        );
        assert_eq!(
            classified[0].copy_number,
            OverlapCopyNumber::Paired { pre: 1, post: 1 }
        );
    }

    #[test]
    fn test_classify_paired_overlaps_without_status() {
        let roh = vec![get_test_roh("chr2", 100, 200, 20.0)];
        let cn = vec![get_test_paired_cn("chr2", 150, 180, 2, 2, 15.0)];
        assert!(classify_paired_overlaps(&overlap_rows(&roh, &cn), NORMAL).is_empty());
    }
}
