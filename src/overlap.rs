//! Per-chromosome interval overlap between two region collections
//!
//! All overlap is computed independently for each chromosome, and chromosomes are processed in
//! parallel on the current rayon thread pool. Results are reassembled in a deterministic
//! chromosome order, and within each chromosome records are visited in start-sorted order, so the
//! output order is reproducible for any thread count.
//!

use std::collections::HashMap;

use itertools::Itertools;
use rayon::prelude::*;

use crate::chrom_interval_index::ChromIntervalIndex;
use crate::genome_region::{GenomicRegion, get_overlap_region};
use crate::scored_region::Scored;

/// Intersection of one record from each input collection
///
pub struct OverlapRecord<'a, A, B> {
    /// Intersected region, always of positive size
    pub region: GenomicRegion,
    pub a: &'a A,
    pub b: &'a B,
}

/// Records of one collection on a single chromosome
pub struct ChromRecords<'a, T> {
    pub chrom: &'a str,
    pub records: Vec<&'a T>,
}

/// Get the order of chromosomes as they first appear in the input collections
///
/// Chromosomes from `a` come before any chromosome found only in `b`.
///
pub fn get_chrom_order<'a, A: Scored, B: Scored>(a: &'a [A], b: &'a [B]) -> Vec<&'a str> {
    a.iter()
        .map(|x| x.chrom())
        .chain(b.iter().map(|x| x.chrom()))
        .unique()
        .collect()
}

/// Split records by chromosome, with the records of each chromosome stably sorted by start and then
/// end position
///
pub fn group_by_chrom<T: Scored>(records: &[T]) -> HashMap<&str, Vec<&T>> {
    let mut chrom_records: HashMap<&str, Vec<&T>> = HashMap::new();
    for record in records.iter() {
        chrom_records.entry(record.chrom()).or_default().push(record);
    }
    for records in chrom_records.values_mut() {
        records.sort_by_key(|x| (x.region().start(), x.region().end()));
    }
    chrom_records
}

/// Get records of one collection for every chromosome in `chrom_order`
///
/// Chromosomes without any records are given an empty record list.
///
pub fn get_chrom_records<'a, T: Scored>(
    chrom_order: &[&'a str],
    records: &'a [T],
) -> Vec<ChromRecords<'a, T>> {
    let mut chrom_records = group_by_chrom(records);
    chrom_order
        .iter()
        .map(|&chrom| ChromRecords {
            chrom,
            records: chrom_records.remove(chrom).unwrap_or_default(),
        })
        .collect()
}

/// Overlap two record lists from the same chromosome
///
/// For each record in `a`, in order, one overlap record is produced for each intersecting record
/// in `b`, in order. Regions which only touch do not intersect.
///
fn get_chrom_overlap_rows<'a, A: Scored, B: Scored>(
    a: &[&'a A],
    b: &[&'a B],
) -> Vec<OverlapRecord<'a, A, B>> {
    let mut overlaps = Vec::new();
    if a.is_empty() || b.is_empty() {
        return overlaps;
    }

    let b_index = ChromIntervalIndex::from_ranges(b.iter().map(|x| &x.region().range));
    for &a_record in a.iter() {
        let a_region = a_record.region();
        for b_record_index in b_index.find_overlap_indices(&a_region.range) {
            let b_record = b[b_record_index];
            if let Some(region) = get_overlap_region(a_region, b_record.region()) {
                overlaps.push(OverlapRecord {
                    region,
                    a: a_record,
                    b: b_record,
                });
            }
        }
    }
    overlaps
}

/// Row-level overlap join of two record collections
///
/// Every pair of same-chromosome records from `a` and `b` with a non-empty intersection produces
/// one overlap record, carrying the intersected region and references to both source records.
///
pub fn overlap_rows<'a, A: Scored + Sync, B: Scored + Sync>(
    a: &'a [A],
    b: &'a [B],
) -> Vec<OverlapRecord<'a, A, B>> {
    let chrom_order = get_chrom_order(a, b);
    let a_chroms = get_chrom_records(&chrom_order, a);
    let b_chroms = get_chrom_records(&chrom_order, b);

    a_chroms
        .par_iter()
        .zip(b_chroms.par_iter())
        .map(|(a_chrom, b_chrom)| {
            assert_eq!(a_chrom.chrom, b_chrom.chrom);
            get_chrom_overlap_rows(&a_chrom.records, &b_chrom.records)
        })
        .collect::<Vec<_>>()
        .into_iter()
        .flatten()
        .collect()
}

/// Candidate-region overlap of two record collections
///
/// This is the same strict per-pair intersection as `overlap_rows`, but only the intersected
/// regions are returned.
///
pub fn overlap_candidates<A: Scored + Sync, B: Scored + Sync>(
    a: &[A],
    b: &[B],
) -> Vec<GenomicRegion> {
    overlap_rows(a, b).into_iter().map(|x| x.region).collect()
}

/// Total length of all overlap records
pub fn get_total_overlap_length<A, B>(overlaps: &[OverlapRecord<A, B>]) -> i64 {
    overlaps.iter().map(|x| x.region.length()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::int_range::IntRange;
    use crate::scored_region::test_utils::*;

    fn get_coords(regions: &[GenomicRegion]) -> Vec<(String, i64, i64)> {
        let mut coords = regions
            .iter()
            .map(|x| (x.chrom.clone(), x.start(), x.end()))
            .collect::<Vec<_>>();
        coords.sort();
        coords
    }

    #[test]
    fn test_single_overlap() {
        let roh = vec![get_test_roh("chr1", 1000, 5000, 20.0)];
        let cn = vec![get_test_cn("chr1", 2000, 3000, 2, 20.0)];

        let overlaps = overlap_rows(&roh, &cn);
        assert_eq!(overlaps.len(), 1);
        assert_eq!(overlaps[0].region.chrom, "chr1");
        assert_eq!(overlaps[0].region.range, IntRange::from_pair(2000, 3000));
        assert_eq!(overlaps[0].b.copy_number, 2);
    }

    #[test]
    fn test_overlap_boundary() {
        let roh = vec![get_test_roh("chr1", 100, 200, 20.0)];

        // Touching regions do not overlap
        let cn = vec![
            get_test_cn("chr1", 200, 300, 2, 20.0),
            get_test_cn("chr1", 0, 100, 2, 20.0),
        ];
        assert!(overlap_rows(&roh, &cn).is_empty());

        // One base of overlap
        let cn = vec![get_test_cn("chr1", 199, 300, 2, 20.0)];
        let overlaps = overlap_rows(&roh, &cn);
        assert_eq!(overlaps.len(), 1);
        assert_eq!(overlaps[0].region.length(), 1);
    }

    #[test]
    fn test_overlap_symmetry() {
        let roh = vec![
            get_test_roh("chr1", 100, 500, 20.0),
            get_test_roh("chr1", 800, 1200, 20.0),
            get_test_roh("chr2", 0, 1000, 20.0),
        ];
        let cn = vec![
            get_test_cn("chr1", 0, 150, 1, 20.0),
            get_test_cn("chr1", 150, 900, 2, 20.0),
            get_test_cn("chr1", 900, 2000, 3, 20.0),
            get_test_cn("chr3", 0, 1000, 2, 20.0),
        ];

        let ab = overlap_candidates(&roh, &cn);
        let ba = overlap_candidates(&cn, &roh);
        assert_eq!(ab.len(), 4);
        assert_eq!(get_coords(&ab), get_coords(&ba));
    }

    #[test]
    fn test_overlap_same_chrom_only() {
        let roh = vec![get_test_roh("chr1", 0, 1000, 20.0)];
        let cn = vec![get_test_cn("chr2", 0, 1000, 2, 20.0)];
        assert!(overlap_rows(&roh, &cn).is_empty());
    }

    #[test]
    fn test_overlap_empty_input() {
        let roh = Vec::<crate::scored_region::RohRegion>::new();
        let cn = vec![get_test_cn("chr1", 0, 1000, 2, 20.0)];
        assert!(overlap_rows(&roh, &cn).is_empty());
        assert!(overlap_rows(&cn, &roh).is_empty());
    }

    #[test]
    fn test_overlap_deterministic_order() {
        // Inputs deliberately out of order
        let roh = vec![
            get_test_roh("chr2", 500, 600, 20.0),
            get_test_roh("chr1", 300, 400, 20.0),
            get_test_roh("chr1", 0, 1000, 20.0),
        ];
        let cn = vec![
            get_test_cn("chr1", 350, 800, 1, 20.0),
            get_test_cn("chr1", 0, 350, 2, 20.0),
            get_test_cn("chr2", 0, 1000, 2, 20.0),
        ];

        let overlaps = overlap_rows(&roh, &cn);
        let coords = overlaps
            .iter()
            .map(|x| (x.region.chrom.as_str(), x.region.start(), x.region.end()))
            .collect::<Vec<_>>();
        assert_eq!(
            coords,
            vec![
                ("chr2", 500, 600),
                ("chr1", 0, 350),
                ("chr1", 350, 800),
                ("chr1", 300, 350),
                ("chr1", 350, 400),
            ]
        );
        assert_eq!(get_total_overlap_length(&overlaps), 100 + 350 + 450 + 50 + 50);
    }
}
