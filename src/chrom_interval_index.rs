//! A light wrapper on top of an interval tree for per-chromosome region lookup
//!

use bio::data_structures::interval_tree::{IntervalTree, IntervalTreeIterator};

use crate::int_range::IntRange;

/// A set of regions on one chromosome which can be efficiently queried
///
/// Each region is stored with its index in the source collection, so that query results can be
/// mapped back to the original records.
///
#[derive(Clone, Default)]
pub struct ChromIntervalIndex {
    regions: IntervalTree<i64, usize>,
}

impl ChromIntervalIndex {
    /// Build index from a list of ranges, the payload of each range is its position in the list
    ///
    pub fn from_ranges<'a>(ranges: impl IntoIterator<Item = &'a IntRange>) -> Self {
        let mut index = Self::default();
        for (range_index, range) in ranges.into_iter().enumerate() {
            index.add_region_value(range.start, range.end, range_index);
        }
        index
    }

    pub fn find_overlaps(&self, start: i64, end: i64) -> IntervalTreeIterator<'_, i64, usize> {
        self.regions.find(start..end)
    }

    /// Find the source index of every region intersecting the query range
    ///
    /// Adjacent regions do not intersect. Indices are returned in ascending order.
    ///
    pub fn find_overlap_indices(&self, range: &IntRange) -> Vec<usize> {
        let mut indices = self
            .find_overlaps(range.start, range.end)
            .map(|x| *x.data())
            .collect::<Vec<_>>();
        indices.sort_unstable();
        indices
    }

    /// Add region value
    ///
    /// Adds a value for a particular region, regions are not collapsed
    ///
    pub fn add_region_value(&mut self, start: i64, end: i64, value: usize) {
        self.regions.insert(start..end, value);
    }
}
