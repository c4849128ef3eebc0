use std::fmt;

/// A simple type for integer ranges
///
/// All ranges follow the bed file range convention: 0-indexed, half-closed, [start,end)
///
/// This struct is used instead of the native rust Range type just to focus on the specific goals of
/// primarily genomic region intervals.
///
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd)]
pub struct IntRange {
    pub start: i64,
    pub end: i64,
}

impl IntRange {
    pub fn from_pair(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    pub fn size(&self) -> i64 {
        self.end - self.start
    }

    /// Return true if the range has positive size
    ///
    pub fn is_valid(&self) -> bool {
        self.start < self.end
    }

    pub fn merge(&mut self, other: &IntRange) {
        if other.start < self.start {
            self.start = other.start;
        }
        if other.end > self.end {
            self.end = other.end;
        }
    }
}

impl fmt::Debug for IntRange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}-{})", self.start, self.end)
    }
}

/// Get the distance between 2 ranges
///
/// The notion of 'distance' between two ranges here means the gap between two ranges that don't intersect.
///
///    [---------)            [-----------)
///        R1    -------------     R2
///                R1/R2 dist
///
/// The distance is 0 if the ranges intersect or are adjacent
///
pub fn get_int_range_distance(ir1: &IntRange, ir2: &IntRange) -> usize {
    use std::cmp::max;
    max(max(ir2.start - ir1.end, ir1.start - ir2.end), 0) as usize
}

/// Get the intersection of two ranges
///
/// Returns None unless the intersection has positive size, so adjacent ranges produce no overlap
///
pub fn get_overlap_range(r1: &IntRange, r2: &IntRange) -> Option<IntRange> {
    let overlap = IntRange {
        start: std::cmp::max(r1.start, r2.start),
        end: std::cmp::min(r1.end, r2.end),
    };
    if overlap.is_valid() {
        Some(overlap)
    } else {
        None
    }
}
