//! Write overlap tables, summaries and region tracks
//!
//! All outputs are tab-delimited. Regions are written as 0-based half-open BED coordinates.
//!

use std::fs::File;
use std::io::Write;

use camino::Utf8Path;
use log::info;
use unwrap::unwrap;

use crate::event_classifier::{ClassifiedOverlap, OverlapCopyNumber};
use crate::genome_region::GenomicRegion;
use crate::summary_stats::{CnvSizeClassCounts, CnvSizeClassSummary, EventSummary, OverlapSummary};

fn get_tsv_writer<W: Write>(writer: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .has_headers(false)
        .delimiter(b'\t')
        .from_writer(writer)
}

/// Create a tsv output file, or panic with an informative message if it can't be created
///
fn create_tsv_file(output_dir: &Utf8Path, filename: &str, label: &str) -> csv::Writer<File> {
    let filename = output_dir.join(filename);

    info!("Writing {label} to file: '{filename}'");

    let f = unwrap!(
        File::create(&filename),
        "Unable to create {label} file: '{filename}'"
    );
    get_tsv_writer(f)
}

/// Write one tsv record per row, panicking on any write error
///
fn write_rows<W: Write>(
    writer: &mut csv::Writer<W>,
    rows: impl IntoIterator<Item = Vec<String>>,
    label: &str,
) {
    for row in rows {
        unwrap!(writer.write_record(&row), "Unable to write {label} record");
    }
    unwrap!(writer.flush(), "Unable to write {label}");
}

fn get_region_rows<'a>(
    regions: impl IntoIterator<Item = &'a GenomicRegion>,
) -> impl Iterator<Item = Vec<String>> {
    regions.into_iter().map(|x| {
        vec![
            x.chrom.clone(),
            x.start().to_string(),
            x.end().to_string(),
        ]
    })
}

/// Write regions as a 3-column BED track with no header
///
pub fn write_region_bed<'a>(
    output_dir: &Utf8Path,
    filename: &str,
    regions: impl IntoIterator<Item = &'a GenomicRegion>,
    label: &str,
) {
    let mut writer = create_tsv_file(output_dir, filename, label);
    write_rows(&mut writer, get_region_rows(regions), label);
}

fn get_overlap_rows(overlaps: &[ClassifiedOverlap], paired: bool) -> Vec<Vec<String>> {
    let header = if paired {
        vec![
            "chrom",
            "start",
            "end",
            "status",
            "copy_number_post",
            "copy_number_pre",
            "event_type",
        ]
    } else {
        vec!["chrom", "start", "end", "copy_number", "event_type"]
    };

    let mut rows = vec![header.into_iter().map(String::from).collect::<Vec<_>>()];
    for x in overlaps.iter() {
        let mut row = vec![
            x.region.chrom.clone(),
            x.region.start().to_string(),
            x.region.end().to_string(),
        ];
        if paired {
            row.push(x.status.map(|s| s.to_string()).unwrap_or_default());
        }
        match x.copy_number {
            OverlapCopyNumber::Single(cn) => row.push(cn.to_string()),
            OverlapCopyNumber::Paired { pre, post } => {
                row.push(post.to_string());
                row.push(pre.to_string());
            }
        }
        row.push(x.event_type.to_string());
        rows.push(row);
    }
    rows
}

/// Write classified ROH/CN overlaps with a header line
///
pub fn write_classified_overlaps(
    output_dir: &Utf8Path,
    filename: &str,
    overlaps: &[ClassifiedOverlap],
    paired: bool,
) {
    let label = "classified overlap table";
    let mut writer = create_tsv_file(output_dir, filename, label);
    write_rows(&mut writer, get_overlap_rows(overlaps, paired), label);
}

fn get_summary_stats_rows(summary: &OverlapSummary) -> Vec<Vec<String>> {
    let mut rows = vec![
        ["cohort", "count", "mean_length", "total_length"]
            .into_iter()
            .map(String::from)
            .collect::<Vec<_>>(),
    ];
    for x in summary.cohorts.iter() {
        rows.push(vec![
            x.cohort.to_string(),
            x.stats.count.to_string(),
            format!("{:.2}", x.stats.mean_length),
            x.stats.total_length.to_string(),
        ]);
    }
    rows
}

/// Write cohort count and length statistics
///
pub fn write_summary_stats(output_dir: &Utf8Path, filename: &str, summary: &OverlapSummary) {
    let label = "summary statistics";
    let mut writer = create_tsv_file(output_dir, filename, label);
    write_rows(&mut writer, get_summary_stats_rows(summary), label);
}

/// Write the count and total overlap length of each LoH event type
///
pub fn write_event_summary(output_dir: &Utf8Path, filename: &str, summary: &[EventSummary]) {
    let label = "event summary";
    let header = ["event_type", "count", "total_length"]
        .into_iter()
        .map(String::from)
        .collect::<Vec<_>>();
    let rows = std::iter::once(header).chain(summary.iter().map(|x| {
        vec![
            x.event_type.clone(),
            x.count.to_string(),
            x.total_length.to_string(),
        ]
    }));
    let mut writer = create_tsv_file(output_dir, filename, label);
    write_rows(&mut writer, rows, label);
}

fn get_cnv_size_class_rows(summary: &CnvSizeClassSummary) -> Vec<Vec<String>> {
    let row = |set: &str, x: &CnvSizeClassCounts| {
        vec![
            set.to_string(),
            x.deletions_over_200kb.to_string(),
            x.deletions_over_1mb.to_string(),
            x.duplications_over_200kb.to_string(),
            x.duplications_over_1mb.to_string(),
        ]
    };
    vec![
        [
            "segment_set",
            "deletions_over_200kb",
            "deletions_over_1mb",
            "duplications_over_200kb",
            "duplications_over_1mb",
        ]
        .into_iter()
        .map(String::from)
        .collect(),
        row("significant", &summary.significant),
        row("all", &summary.all),
    ]
}

/// Write copy number loss and gain counts by size class
///
pub fn write_cnv_size_classes(output_dir: &Utf8Path, filename: &str, summary: &CnvSizeClassSummary) {
    let label = "CNV size class summary";
    let mut writer = create_tsv_file(output_dir, filename, label);
    write_rows(&mut writer, get_cnv_size_class_rows(summary), label);
}
