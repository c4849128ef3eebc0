//! Read ROH and copy number input tables
//!
//! All inputs are tab-delimited text, optionally gzip-compressed. Coordinates are read as 1-based
//! fully-closed intervals and converted to 0-based half-open regions on input.
//!

use std::fs::File;
use std::io::{BufReader, Read};
use std::str::FromStr;

use camino::Utf8Path;
use csv::{ReaderBuilder, StringRecord, Trim};
use log::{info, warn};
use serde::Serialize;
use simple_error::{SimpleResult, bail};
use thousands::Separable;
use unwrap::unwrap;

use crate::cli::defaults::NORMAL_COPY_NUMBER;
use crate::genome_region::{GenomicRegion, normalize_chrom_label};
use crate::scored_region::{CnSegment, CnSegmentPaired, RohRegion, RohStatus, ScoredRegion};

/// Per-file ingestion counts
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct InputReadStats {
    pub record_count: usize,

    /// Rows which could not be parsed, each reported with a warning
    pub malformed_record_count: usize,

    /// Rows with an empty or inverted region, dropped without warning
    pub invalid_region_count: usize,

    /// Rows of another record type or sample
    pub skipped_record_count: usize,
}

pub struct InputRecords<T> {
    pub records: T,
    pub stats: InputReadStats,
}

enum RowOutcome<T> {
    Record(T),
    InvalidRegion,
    Skipped,
}

/// Track row outcomes for one input file
///
struct RowTracker<'a> {
    label: &'a str,
    stats: InputReadStats,
}

impl<'a> RowTracker<'a> {
    fn new(label: &'a str) -> Self {
        Self {
            label,
            stats: InputReadStats::default(),
        }
    }

    fn add<T>(&mut self, line_number: u64, outcome: SimpleResult<RowOutcome<T>>) -> Option<T> {
        match outcome {
            Ok(RowOutcome::Record(x)) => {
                self.stats.record_count += 1;
                Some(x)
            }
            Ok(RowOutcome::InvalidRegion) => {
                self.stats.invalid_region_count += 1;
                None
            }
            Ok(RowOutcome::Skipped) => {
                self.stats.skipped_record_count += 1;
                None
            }
            Err(msg) => {
                self.malformed(line_number, &msg.to_string());
                None
            }
        }
    }

    fn malformed(&mut self, line_number: u64, msg: &str) {
        warn!(
            "Skipping malformed record on line {line_number} of {}: {msg}",
            self.label
        );
        self.stats.malformed_record_count += 1;
    }

    fn finish(self) -> InputReadStats {
        info!(
            "Read {} records from {}",
            self.stats.record_count.separate_with_commas(),
            self.label
        );
        if self.stats.malformed_record_count > 0 {
            warn!(
                "Skipped {} malformed records from {}",
                self.stats.malformed_record_count.separate_with_commas(),
                self.label
            );
        }
        self.stats
    }
}

/// Open an input file for reading, transparently decompressing files ending in '.gz'
///
pub fn open_input_file(filename: &Utf8Path) -> Box<dyn Read> {
    let file = unwrap!(
        File::open(filename),
        "Unable to open input file: '{filename}'"
    );
    if filename.as_str().ends_with(".gz") {
        Box::new(BufReader::new(flate2::read::MultiGzDecoder::new(file)))
    } else {
        Box::new(BufReader::new(file))
    }
}

fn get_tsv_reader<R: Read>(reader: R, skip_comments: bool) -> csv::Reader<R> {
    ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .comment(if skip_comments { Some(b'#') } else { None })
        .delimiter(b'\t')
        .from_reader(reader)
}

fn get_line_number(record: &StringRecord) -> u64 {
    record.position().map(|x| x.line()).unwrap_or(0)
}

fn get_field<'a>(record: &'a StringRecord, index: usize, name: &str) -> SimpleResult<&'a str> {
    match record.get(index) {
        Some(x) => Ok(x),
        None => bail!("missing {name} field in column {}", index + 1),
    }
}

fn parse_field<T: FromStr>(record: &StringRecord, index: usize, name: &str) -> SimpleResult<T> {
    let field = get_field(record, index, name)?;
    match field.parse::<T>() {
        Ok(x) => Ok(x),
        Err(_) => bail!("can't parse {name} value '{field}'"),
    }
}

/// Parse an optional float, where an empty or NaN value is reported as None
///
fn parse_optional_float(field: Option<&str>, name: &str) -> SimpleResult<Option<f64>> {
    let field = match field {
        Some(x) if !x.is_empty() => x,
        _ => return Ok(None),
    };
    match field.parse::<f64>() {
        Ok(x) if x.is_nan() => Ok(None),
        Ok(x) => Ok(Some(x)),
        Err(_) => bail!("can't parse {name} value '{field}'"),
    }
}

/// Parse a copy number, which may be written as a float and is truncated to an integer
///
fn parse_copy_number(field: Option<&str>) -> SimpleResult<Option<i32>> {
    Ok(parse_optional_float(field, "copy number")?.map(|x| x.trunc() as i32))
}

fn parse_count(field: Option<&str>, name: &str) -> SimpleResult<u32> {
    Ok(parse_optional_float(field, name)?.map_or(0, |x| x.max(0.0) as u32))
}

/// Convert a 1-based fully-closed interval into a 0-based half-open region
///
/// Returns None for regions of zero or negative size.
///
fn get_input_region(chrom: &str, start: i64, end: i64) -> Option<GenomicRegion> {
    GenomicRegion::new(&normalize_chrom_label(chrom), start - 1, end)
}

/// Parse one row of bcftools roh output
///
/// Columns are: RG, sample, chrom, start, end, length, marker count, quality
///
fn parse_bcftools_roh_row(
    record: &StringRecord,
    sample: Option<&str>,
) -> SimpleResult<RowOutcome<RohRegion>> {
    if record.get(0) != Some("RG") {
        return Ok(RowOutcome::Skipped);
    }
    if let Some(sample) = sample {
        if get_field(record, 1, "sample")? != sample {
            return Ok(RowOutcome::Skipped);
        }
    }
    if record.len() < 8 {
        bail!("expected 8 columns but found {}", record.len());
    }

    let chrom = get_field(record, 2, "chromosome")?;
    let start = parse_field::<i64>(record, 3, "start")?;
    let end = parse_field::<i64>(record, 4, "end")?;
    let quality = parse_optional_float(record.get(7), "quality")?;

    Ok(match get_input_region(chrom, start, end) {
        Some(region) => RowOutcome::Record(RohRegion {
            scored: ScoredRegion::new(region, quality),
            status: None,
        }),
        None => RowOutcome::InvalidRegion,
    })
}

/// Read ROH regions from bcftools roh output
///
/// # Arguments
///
/// * `sample` - If defined, only regions from this sample are read
/// * `label` - Describes the input in log messages
///
pub fn read_bcftools_roh<R: Read>(
    reader: R,
    sample: Option<&str>,
    label: &str,
) -> InputRecords<Vec<RohRegion>> {
    let mut rdr = get_tsv_reader(reader, true);
    let mut tracker = RowTracker::new(label);
    let mut records = Vec::new();
    let mut samples: Vec<String> = Vec::new();
    for result in rdr.records() {
        let record = match result {
            Ok(x) => x,
            Err(e) => {
                let line_number = e.position().map(|x| x.line()).unwrap_or(0);
                tracker.malformed(line_number, &e.to_string());
                continue;
            }
        };
        let line_number = get_line_number(&record);
        if let Some(x) = tracker.add(line_number, parse_bcftools_roh_row(&record, sample)) {
            if sample.is_none() {
                if let Some(s) = record.get(1) {
                    if !samples.iter().any(|x| x == s) {
                        samples.push(s.to_string());
                    }
                }
            }
            records.push(x);
        }
    }

    if samples.len() > 1 {
        warn!(
            "ROH input {label} contains {} samples, and no sample name was given to select one. Regions from all samples will be used",
            samples.len()
        );
    }
    if let Some(sample) = sample {
        if records.is_empty() {
            warn!("No ROH regions found for sample '{sample}' in {label}");
        }
    }

    InputRecords {
        records,
        stats: tracker.finish(),
    }
}

/// Parse one row of a differential ROH table
///
/// Columns are: status, chrom, start, end, quality, then an optional copy of the source line
///
fn parse_differential_roh_row(record: &StringRecord) -> SimpleResult<RowOutcome<RohRegion>> {
    if record.len() < 5 {
        bail!("expected at least 5 columns but found {}", record.len());
    }

    let status_str = get_field(record, 0, "status")?;
    let status = match RohStatus::from_str(status_str) {
        Ok(x) => x,
        Err(_) => bail!("unknown ROH status '{status_str}'"),
    };
    let chrom = get_field(record, 1, "chromosome")?;
    let start = parse_field::<i64>(record, 2, "start")?;
    let end = parse_field::<i64>(record, 3, "end")?;
    let quality = parse_optional_float(record.get(4), "quality")?;

    Ok(match get_input_region(chrom, start, end) {
        Some(region) => RowOutcome::Record(RohRegion {
            scored: ScoredRegion::new(region, quality),
            status: Some(status),
        }),
        None => RowOutcome::InvalidRegion,
    })
}

/// Read ROH regions with pre/post status from a differential ROH table
///
/// The first non-comment line is a header, and is skipped.
///
pub fn read_differential_roh<R: Read>(reader: R, label: &str) -> InputRecords<Vec<RohRegion>> {
    let mut rdr = get_tsv_reader(reader, true);
    let mut tracker = RowTracker::new(label);
    let mut records = Vec::new();
    for (record_index, result) in rdr.records().enumerate() {
        let record = match result {
            Ok(x) => x,
            Err(e) => {
                let line_number = e.position().map(|x| x.line()).unwrap_or(0);
                tracker.malformed(line_number, &e.to_string());
                continue;
            }
        };
        if record_index == 0 {
            continue;
        }
        let line_number = get_line_number(&record);
        if let Some(x) = tracker.add(line_number, parse_differential_roh_row(&record)) {
            records.push(x);
        }
    }

    InputRecords {
        records,
        stats: tracker.finish(),
    }
}

/// Layout of a copy number summary table, decided once per input from the run mode
///
#[derive(Clone, Debug, PartialEq)]
enum CnSummaryShape {
    /// Columns are: RG, chrom, start, end, copy number, quality, site count, het count
    Single,

    /// Columns are: RG, chrom, start, end, post copy number, pre copy number, quality, post site
    /// count, post het count, pre site count, pre het count
    ///
    /// Sample names are used to match copy number columns when the layout is taken from a header.
    ///
    Paired {
        pre_sample: Option<String>,
        post_sample: Option<String>,
    },
}

impl CnSummaryShape {
    fn expected_column_count(&self) -> usize {
        match self {
            CnSummaryShape::Single => 8,
            CnSummaryShape::Paired { .. } => 11,
        }
    }
}

/// Column positions for one sample in a copy number summary
#[derive(Clone, Debug, PartialEq)]
struct CnSampleColumns {
    copy_number: usize,
    n_sites: Option<usize>,
    n_hets: Option<usize>,
}

/// Column positions of a copy number summary table
///
/// For paired tables `samples` holds the post sample first and the pre sample second.
///
#[derive(Clone, Debug, PartialEq)]
struct CnColumnLayout {
    chrom: usize,
    start: usize,
    end: usize,
    quality: Option<usize>,
    samples: Vec<CnSampleColumns>,
}

impl CnColumnLayout {
    fn from_shape(shape: &CnSummaryShape) -> Self {
        match shape {
            CnSummaryShape::Single => Self {
                chrom: 1,
                start: 2,
                end: 3,
                quality: Some(5),
                samples: vec![CnSampleColumns {
                    copy_number: 4,
                    n_sites: Some(6),
                    n_hets: Some(7),
                }],
            },
            CnSummaryShape::Paired { .. } => Self {
                chrom: 1,
                start: 2,
                end: 3,
                quality: Some(6),
                samples: vec![
                    CnSampleColumns {
                        copy_number: 4,
                        n_sites: Some(7),
                        n_hets: Some(8),
                    },
                    CnSampleColumns {
                        copy_number: 5,
                        n_sites: Some(9),
                        n_hets: Some(10),
                    },
                ],
            },
        }
    }

    /// Locate columns from header names
    ///
    /// Returns None if the header does not name all required columns.
    ///
    fn from_header(header: &StringRecord, shape: &CnSummaryShape) -> Option<Self> {
        let names = header
            .iter()
            .map(normalize_header_name)
            .collect::<Vec<_>>();

        let chrom = find_column(&names, |x| matches!(x, "chr" | "chrom" | "chromosome"))?;
        let start = find_column(&names, |x| x == "start")?;
        let end = find_column(&names, |x| x == "end")?;
        let quality = find_column(&names, |x| matches!(x, "quality" | "qs"));
        let copy_numbers = find_columns(&names, |x| {
            x.starts_with("copy_number") || x == "cn" || x.starts_with("cn:") || x.starts_with("cn_")
        });
        let n_sites = find_columns(&names, |x| x.starts_with("nsites"));
        let n_hets = find_columns(&names, |x| x.starts_with("nhets"));

        let samples = match shape {
            CnSummaryShape::Single => {
                vec![CnSampleColumns {
                    copy_number: *copy_numbers.first()?,
                    n_sites: n_sites.first().copied(),
                    n_hets: n_hets.first().copied(),
                }]
            }
            CnSummaryShape::Paired {
                pre_sample,
                post_sample,
            } => {
                let post_tags = get_sample_tags(post_sample.as_deref(), "post");
                let pre_tags = get_sample_tags(pre_sample.as_deref(), "pre");
                let assign = |columns: &[usize]| {
                    assign_paired_columns(columns, &names, &post_tags, &pre_tags)
                };
                let (post_cn, pre_cn) = assign(&copy_numbers);
                let (post_sites, pre_sites) = assign(&n_sites);
                let (post_hets, pre_hets) = assign(&n_hets);
                vec![
                    CnSampleColumns {
                        copy_number: post_cn?,
                        n_sites: post_sites,
                        n_hets: post_hets,
                    },
                    CnSampleColumns {
                        copy_number: pre_cn?,
                        n_sites: pre_sites,
                        n_hets: pre_hets,
                    },
                ]
            }
        };

        Some(Self {
            chrom,
            start,
            end,
            quality,
            samples,
        })
    }
}

fn find_column(names: &[String], is_match: impl Fn(&str) -> bool) -> Option<usize> {
    names.iter().position(|x| is_match(x.as_str()))
}

fn find_columns(names: &[String], is_match: impl Fn(&str) -> bool) -> Vec<usize> {
    names
        .iter()
        .enumerate()
        .filter(|(_, x)| is_match(x.as_str()))
        .map(|(i, _)| i)
        .collect()
}

/// Normalize header names such as '[5]Copy number:sample1' to 'copy_number:sample1'
///
fn normalize_header_name(name: &str) -> String {
    let name = name.trim_start_matches('#');
    let name = match name.rfind(']') {
        Some(x) => &name[x + 1..],
        None => name,
    };
    name.trim().to_lowercase().replace(' ', "_")
}

fn get_sample_tags(sample: Option<&str>, side: &str) -> Vec<String> {
    let mut tags = vec![format!("_{side}")];
    if let Some(sample) = sample {
        tags.push(format!(":{}", sample.to_lowercase()));
    }
    tags
}

/// Split a list of same-type columns into post and pre sample columns
///
/// Columns are matched to a sample by name suffix first, and any remaining columns are assigned to
/// the post sample and then the pre sample in order.
///
fn assign_paired_columns(
    columns: &[usize],
    names: &[String],
    post_tags: &[String],
    pre_tags: &[String],
) -> (Option<usize>, Option<usize>) {
    let has_tag = |i: usize, tags: &[String]| tags.iter().any(|t| names[i].ends_with(t.as_str()));
    let tagged_post = columns.iter().copied().find(|&i| has_tag(i, post_tags));
    let tagged_pre = columns
        .iter()
        .copied()
        .find(|&i| Some(i) != tagged_post && has_tag(i, pre_tags));

    let mut unassigned = columns
        .iter()
        .copied()
        .filter(|&i| Some(i) != tagged_post && Some(i) != tagged_pre);
    let post = tagged_post.or_else(|| unassigned.next());
    let pre = tagged_pre.or_else(|| unassigned.next());
    (post, pre)
}

/// Return true if the record looks like a header line naming the table columns
///
fn is_header_record(record: &StringRecord) -> bool {
    let names = record.iter().map(normalize_header_name).collect::<Vec<_>>();
    names.iter().any(|x| x == "start") && names.iter().any(|x| x == "end")
}

struct CnSegmentFields {
    region: GenomicRegion,
    quality: Option<f64>,
    copy_number: Vec<Option<i32>>,
    n_sites: Vec<u32>,
    n_hets: Vec<u32>,
}

fn parse_cn_summary_row(
    record: &StringRecord,
    layout: &CnColumnLayout,
) -> SimpleResult<RowOutcome<CnSegmentFields>> {
    let chrom = get_field(record, layout.chrom, "chromosome")?;
    let start = parse_field::<i64>(record, layout.start, "start")?;
    let end = parse_field::<i64>(record, layout.end, "end")?;
    let quality = match layout.quality {
        Some(x) => parse_optional_float(record.get(x), "quality")?,
        None => None,
    };

    let mut copy_number = Vec::new();
    let mut n_sites = Vec::new();
    let mut n_hets = Vec::new();
    for sample in layout.samples.iter() {
        copy_number.push(parse_copy_number(record.get(sample.copy_number))?);
        n_sites.push(parse_count(
            sample.n_sites.and_then(|x| record.get(x)),
            "site count",
        )?);
        n_hets.push(parse_count(
            sample.n_hets.and_then(|x| record.get(x)),
            "het count",
        )?);
    }

    Ok(match get_input_region(chrom, start, end) {
        Some(region) => RowOutcome::Record(CnSegmentFields {
            region,
            quality,
            copy_number,
            n_sites,
            n_hets,
        }),
        None => RowOutcome::InvalidRegion,
    })
}

fn get_single_cn_segment(fields: CnSegmentFields) -> SimpleResult<CnSegment> {
    let copy_number = match fields.copy_number[0] {
        Some(x) => x,
        None => bail!("missing copy number"),
    };
    Ok(CnSegment {
        scored: ScoredRegion::new(fields.region, fields.quality),
        copy_number,
        n_sites: fields.n_sites[0],
        n_hets: fields.n_hets[0],
    })
}

/// Missing copy numbers in a paired summary default to the normal copy number
///
fn get_paired_cn_segment(fields: CnSegmentFields) -> SimpleResult<CnSegmentPaired> {
    Ok(CnSegmentPaired {
        scored: ScoredRegion::new(fields.region, fields.quality),
        copy_number_post: fields.copy_number[0].unwrap_or(NORMAL_COPY_NUMBER),
        copy_number_pre: fields.copy_number[1].unwrap_or(NORMAL_COPY_NUMBER),
        n_sites_post: fields.n_sites[0],
        n_hets_post: fields.n_hets[0],
        n_sites_pre: fields.n_sites[1],
        n_hets_pre: fields.n_hets[1],
    })
}

/// Read a copy number summary table
///
/// Rows are expected to follow the fixed column layout of `shape`. When a row has a different
/// column count, columns are located from the most recent header line instead. Rows that cannot
/// be matched to either layout are skipped as malformed.
///
fn read_cn_summary<R: Read, T>(
    reader: R,
    shape: &CnSummaryShape,
    label: &str,
    get_segment: impl Fn(CnSegmentFields) -> SimpleResult<T>,
) -> InputRecords<Vec<T>> {
    let mut rdr = get_tsv_reader(reader, false);
    let mut tracker = RowTracker::new(label);

    let default_layout = CnColumnLayout::from_shape(shape);
    let expected_column_count = shape.expected_column_count();
    let mut header_layout = None;
    let mut layout_warning = false;

    let mut records = Vec::new();
    for result in rdr.records() {
        let record = match result {
            Ok(x) => x,
            Err(e) => {
                let line_number = e.position().map(|x| x.line()).unwrap_or(0);
                tracker.malformed(line_number, &e.to_string());
                continue;
            }
        };
        let line_number = get_line_number(&record);

        if is_header_record(&record) {
            header_layout = CnColumnLayout::from_header(&record, shape);
            continue;
        }
        if record.get(0).is_some_and(|x| x.starts_with('#')) || record.iter().all(str::is_empty) {
            continue;
        }

        let layout = if record.len() == expected_column_count {
            &default_layout
        } else {
            if !layout_warning {
                warn!(
                    "Copy number summary {label} has {} columns on line {line_number}, expected {expected_column_count}. Locating columns from the header line",
                    record.len()
                );
                layout_warning = true;
            }
            match &header_layout {
                Some(x) => x,
                None => {
                    tracker.malformed(
                        line_number,
                        "unexpected column count and no usable header line",
                    );
                    continue;
                }
            }
        };

        let outcome = parse_cn_summary_row(&record, layout).and_then(|x| match x {
            RowOutcome::Record(fields) => get_segment(fields).map(RowOutcome::Record),
            RowOutcome::InvalidRegion => Ok(RowOutcome::InvalidRegion),
            RowOutcome::Skipped => Ok(RowOutcome::Skipped),
        });
        if let Some(x) = tracker.add(line_number, outcome) {
            records.push(x);
        }
    }

    InputRecords {
        records,
        stats: tracker.finish(),
    }
}

/// Read a single-sample copy number summary table
///
pub fn read_single_cn_summary<R: Read>(reader: R, label: &str) -> InputRecords<Vec<CnSegment>> {
    read_cn_summary(reader, &CnSummaryShape::Single, label, get_single_cn_segment)
}

/// Read a paired copy number summary table
///
/// Sample names are only used to match copy number columns when the layout is taken from a header.
///
pub fn read_paired_cn_summary<R: Read>(
    reader: R,
    pre_sample: Option<&str>,
    post_sample: Option<&str>,
    label: &str,
) -> InputRecords<Vec<CnSegmentPaired>> {
    let shape = CnSummaryShape::Paired {
        pre_sample: pre_sample.map(String::from),
        post_sample: post_sample.map(String::from),
    };
    read_cn_summary(reader, &shape, label, get_paired_cn_segment)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_test_paired_cn(input: &str) -> InputRecords<Vec<CnSegmentPaired>> {
        read_paired_cn_summary(input.as_bytes(), Some("pre1"), Some("post1"), "test")
    }

    #[test]
    fn test_read_bcftools_roh() {
        let input = "\
# RG, Regions\t[2]Sample\t[3]Chromosome\t[4]Start\t[5]End\t[6]Length (bp)\t[7]Number of markers\t[8]Quality
ST\ts1\t1\t1000\t1\t20.0
RG\ts1\t1\t1001\t5000\t4000\t50\t20.0
RG\ts2\t1\t1001\t5000\t4000\t50\t30.0
RG\ts1\t23\t101\t200\t100\t5\t15.0
RG\ts1\t2\t500\t100\t0\t5\t15.0
RG\ts1\t2\tfoo\t100\t0\t5\t15.0
";
        let roh = read_bcftools_roh(input.as_bytes(), Some("s1"), "test");
        assert_eq!(roh.records.len(), 2);
        assert_eq!(roh.records[0].scored.region.chrom, "1");
        assert_eq!(roh.records[0].scored.region.start(), 1000);
        assert_eq!(roh.records[0].scored.region.end(), 5000);
        assert_eq!(roh.records[0].scored.quality, Some(20.0));
        assert_eq!(roh.records[0].status, None);
        assert_eq!(roh.records[1].scored.region.chrom, "X");

        assert_eq!(roh.stats.record_count, 2);
        assert_eq!(roh.stats.invalid_region_count, 1);
        assert_eq!(roh.stats.malformed_record_count, 1);
        assert_eq!(roh.stats.skipped_record_count, 2);

        let roh = read_bcftools_roh(input.as_bytes(), None, "test");
        assert_eq!(roh.records.len(), 3);
    }

    #[test]
    fn test_read_differential_roh() {
        let input = "\
Status\tChromosome\tStart\tEnd\tQuality\tOriginal_Line
NEW_IN_POST\tchr2\t101\t200\t20.0\tRG\tpost\tchr2\t101\t200
LOST_IN_POST\tchr2\t301\t400\t10.0\tRG\tpre\tchr2\t301\t400
UNCHANGED\tchr3\t1\t50\tnan
GAINED\tchr3\t1\t50\t20.0
UNCHANGED\tchr3\t1\t50
";
        let roh = read_differential_roh(input.as_bytes(), "test");
        assert_eq!(roh.records.len(), 3);
        assert_eq!(roh.records[0].status, Some(RohStatus::NewInPost));
        assert_eq!(roh.records[0].scored.region.start(), 100);
        assert_eq!(roh.records[1].status, Some(RohStatus::LostInPost));
        assert_eq!(roh.records[2].scored.quality, None);
        assert_eq!(roh.stats.malformed_record_count, 2);
    }

    #[test]
    fn test_read_single_cn_summary() {
        let input = "\
# RG, Regions\t[2]Chromosome\t[3]Start\t[4]End\t[5]Copy number:s1\t[6]Quality\t[7]nSites\t[8]nHETs
RG\tchr1\t2001\t3000\t2\t20.0\t100\t0
RG\tchr1\t3001\t9000\t1.0\t35.5\t80\t2
RG\tchr1\t9001\t9500\t\t35.5\t80\t2
";
        let cn = read_single_cn_summary(input.as_bytes(), "test");
        assert_eq!(cn.stats.malformed_record_count, 1);
        let segments = cn.records;
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].scored.region.start(), 2000);
        assert_eq!(segments[0].scored.region.end(), 3000);
        assert_eq!(segments[0].copy_number, 2);
        assert_eq!(segments[0].n_sites, 100);
        assert_eq!(segments[1].copy_number, 1);
        assert_eq!(segments[1].n_hets, 2);
    }

    #[test]
    fn test_read_paired_cn_summary() {
        let input = "\
RG\tchr1\t1\t1000\t1\t2\t20.0\t10\t0\t10\t1
RG\tchr1\t1001\t2000\tnan\t3\t20.0\t10\t0\t10\t1
";
        let segments = read_test_paired_cn(input).records;
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].copy_number_post, 1);
        assert_eq!(segments[0].copy_number_pre, 2);
        assert_eq!(segments[0].n_hets_pre, 1);

        // Missing copy number defaults to normal
        assert_eq!(segments[1].copy_number_post, 2);
        assert_eq!(segments[1].copy_number_pre, 3);
    }

    #[test]
    fn test_cn_summary_header_layout() {
        // Columns reordered relative to the fixed layout
        let input = "\
#Chromosome\tStart\tEnd\tQuality\tCopy_number:pre1\tCopy_number:post1
chr1\t1\t1000\t20.0\t1\t3
chr1\t1001\t2000\t20.0\t2\t2
";
        let cn = read_test_paired_cn(input);
        assert_eq!(cn.stats.malformed_record_count, 0);
        let segments = cn.records;
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].copy_number_pre, 1);
        assert_eq!(segments[0].copy_number_post, 3);
        assert_eq!(segments[0].n_sites_post, 0);
    }

    #[test]
    fn test_cn_summary_unknown_layout() {
        let input = "\
RG\tchr1\t1\t1000\t1
RG\tchr1\t1001\t2000\t2\t20.0\t10\t0
";
        let cn = read_single_cn_summary(input.as_bytes(), "test");
        assert_eq!(cn.stats.malformed_record_count, 1);
        assert_eq!(cn.records.len(), 1);
    }

    #[test]
    fn test_empty_input() {
        let roh = read_bcftools_roh("".as_bytes(), None, "test");
        assert!(roh.records.is_empty());
        let cn = read_single_cn_summary("".as_bytes(), "test");
        assert!(cn.records.is_empty());
    }

    #[test]
    fn test_normalize_header_name() {
        assert_eq!(normalize_header_name("[5]Copy number:S1"), "copy_number:s1");
        assert_eq!(normalize_header_name("# RG, Regions"), "rg,_regions");
        assert_eq!(normalize_header_name("nSites_post"), "nsites_post");
    }
}
