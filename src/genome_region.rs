use std::fmt;

pub use crate::int_range::IntRange;
use crate::int_range::{get_int_range_distance, get_overlap_range};

/// The structure represents a contiguous region of the genome on a single chromosome
///
/// Regions always have positive size, construction of an empty or inverted region is rejected.
///
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd)]
pub struct GenomicRegion {
    pub chrom: String,
    pub range: IntRange,
}

impl GenomicRegion {
    /// Create a new region, returns None if `start >= end`
    ///
    pub fn new(chrom: &str, start: i64, end: i64) -> Option<Self> {
        let range = IntRange::from_pair(start, end);
        if range.is_valid() {
            Some(Self {
                chrom: chrom.to_string(),
                range,
            })
        } else {
            None
        }
    }

    pub fn start(&self) -> i64 {
        self.range.start
    }

    pub fn end(&self) -> i64 {
        self.range.end
    }

    pub fn length(&self) -> i64 {
        self.range.size()
    }
}

impl fmt::Debug for GenomicRegion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Region: {}:{:?}", self.chrom, self.range)
    }
}

/// Get the intersection of two regions
///
/// Returns None if the regions are on different chromosomes, or if the intersection is empty.
///
pub fn get_overlap_region(r1: &GenomicRegion, r2: &GenomicRegion) -> Option<GenomicRegion> {
    if r1.chrom != r2.chrom {
        return None;
    }
    get_overlap_range(&r1.range, &r2.range).map(|range| GenomicRegion {
        chrom: r1.chrom.clone(),
        range,
    })
}

/// Merge overlapping or adjacent regions
///
/// Input regions must all be on the same chromosome. Output regions are sorted by start position.
///
pub fn merge_chrom_regions(regions: &[GenomicRegion]) -> Vec<GenomicRegion> {
    let mut sorted = regions.to_vec();
    sorted.sort_by_key(|x| (x.range.start, x.range.end));

    let mut merged: Vec<GenomicRegion> = Vec::new();
    for region in sorted {
        if let Some(last) = merged.last_mut() {
            assert_eq!(last.chrom, region.chrom);
            if get_int_range_distance(&last.range, &region.range) == 0 {
                last.range.merge(&region.range);
                continue;
            }
        }
        merged.push(region);
    }
    merged
}

/// Normalize chromosome labels from numeric sex chromosome conventions
///
/// Some array processing tools report the X and Y chromosomes as '23' and '24'. All other labels
/// are returned unchanged.
///
pub fn normalize_chrom_label(label: &str) -> String {
    match label.trim().parse::<u32>() {
        Ok(23) => "X".to_string(),
        Ok(24) => "Y".to_string(),
        Ok(x) => x.to_string(),
        Err(_) => label.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_region() {
        assert!(GenomicRegion::new("chr1", 10, 20).is_some());
        assert!(GenomicRegion::new("chr1", 10, 10).is_none());
        assert!(GenomicRegion::new("chr1", 20, 10).is_none());

        let r = GenomicRegion::new("chr1", 99, 200).unwrap();
        assert_eq!(r.length(), 101);
    }

    #[test]
    fn test_get_overlap_region() {
        let r1 = GenomicRegion::new("chr1", 1000, 5000).unwrap();
        let r2 = GenomicRegion::new("chr1", 2000, 3000).unwrap();
        let r3 = GenomicRegion::new("chr2", 2000, 3000).unwrap();

        assert_eq!(get_overlap_region(&r1, &r2), Some(r2.clone()));
        assert_eq!(get_overlap_region(&r2, &r1), Some(r2.clone()));
        assert_eq!(get_overlap_region(&r1, &r3), None);
    }

    #[test]
    fn test_merge_chrom_regions() {
        let regions = vec![
            GenomicRegion::new("chr1", 50, 60).unwrap(),
            GenomicRegion::new("chr1", 10, 20).unwrap(),
            GenomicRegion::new("chr1", 20, 30).unwrap(),
            GenomicRegion::new("chr1", 25, 40).unwrap(),
        ];
        let merged = merge_chrom_regions(&regions);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].range, IntRange::from_pair(10, 40));
        assert_eq!(merged[1].range, IntRange::from_pair(50, 60));
    }

    #[test]
    fn test_normalize_chrom_label() {
        assert_eq!(normalize_chrom_label("23"), "X");
        assert_eq!(normalize_chrom_label("24"), "Y");
        assert_eq!(normalize_chrom_label("7"), "7");
        assert_eq!(normalize_chrom_label("chr7"), "chr7");
        assert_eq!(normalize_chrom_label("chrX"), "chrX");
    }
}
