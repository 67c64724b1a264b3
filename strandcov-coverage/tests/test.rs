use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use noodles::bam;
use noodles::csi::binning_index::{Indexer, index::reference_sequence::bin::Chunk};
use noodles::sam;
use noodles::sam::alignment::Record as _;
use noodles::sam::alignment::io::Write as _;
use pretty_assertions::assert_eq;
use rstest::*;

use strandcov_core::CoreError;
use strandcov_core::models::{ReferenceSequence, Strand};
use strandcov_core::utils::bam_index_path;
use strandcov_coverage::parallel::par_indexed_bam_coverage;
use strandcov_coverage::*;

#[fixture]
fn path_to_paired_sam() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("tests/data/coverage/paired.sam")
}

/// Copy a fixture into a fresh directory so derived outputs land somewhere disposable.
fn stage(fixture: &Path) -> (tempfile::TempDir, PathBuf) {
    let tempdir = tempfile::tempdir().unwrap();
    let staged = tempdir.path().join(fixture.file_name().unwrap());
    fs::copy(fixture, &staged).unwrap();
    (tempdir, staged)
}

/// A deterministic mix of single reads and proper pairs spread over three references.
fn synthetic_records() -> Vec<AlignedRecord> {
    let mut records = Vec::new();
    for i in 0..60u64 {
        let reference_index = (i % 3) as usize;
        let start = (i * 37) % 400;
        let reverse = i % 2 == 1;

        let record = match i % 4 {
            // single end
            0 | 1 => AlignedRecord {
                start,
                alignment_end: start + 25,
                is_reverse_strand: reverse,
                reference_index,
                ..Default::default()
            },
            // first mate of a proper pair
            2 => AlignedRecord {
                is_proper_pair: true,
                is_first_in_pair: true,
                start,
                alignment_end: start + 30,
                insert_size: 80,
                mate_position: Some(start + 50),
                reference_index,
                ..Default::default()
            },
            _ => AlignedRecord {
                is_proper_pair: true,
                is_first_in_pair: true,
                is_reverse_strand: true,
                start: start + 40,
                alignment_end: start + 70,
                insert_size: -70,
                mate_position: Some(start),
                reference_index,
                ..Default::default()
            },
        };
        records.push(record);

        // the second mate never counts, whatever it claims
        if record.is_proper_pair {
            records.push(AlignedRecord {
                is_first_in_pair: false,
                start: record.start + 500,
                alignment_end: record.alignment_end + 500,
                ..record
            });
        }
    }

    records.push(AlignedRecord {
        is_unmapped: true,
        ..Default::default()
    });
    records
}

fn synthetic_source() -> InMemorySource {
    InMemorySource::new(
        vec![
            ReferenceSequence::new("chrA", Some(500)),
            ReferenceSequence::new("chrB", Some(500)),
            ReferenceSequence::new("chrC", None),
        ],
        synthetic_records(),
    )
}

fn accumulate(strategy: &dyn CoverageStrategy, source: &mut dyn AlignmentSource) -> Vec<CoverageTrack> {
    let mut tracks = Vec::new();
    strategy
        .accumulate(source, &TrackSizing::with_fallback(1000), &mut |track| {
            tracks.push(track);
            Ok(())
        })
        .unwrap();
    tracks
}

#[rstest]
fn test_convert_sam_end_to_end(path_to_paired_sam: PathBuf) {
    let (tempdir, staged) = stage(&path_to_paired_sam);

    let (output, summary) =
        convert_alignment_file(&staged, None, &ConversionConfig::default()).unwrap();

    assert_eq!(output, tempdir.path().join("paired.gff"));
    assert_eq!(summary.references, 2);
    assert_eq!(summary.lines, 305);

    let contents = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 305);

    // chr1 plus: [10, 20) from the single read, [100, 250) from the forward pair
    assert_eq!(lines[0], "NC_000913\tpaired.sam\t\t10\t10\t1.00\t+\t.\t.");
    assert_eq!(lines[10], "NC_000913\tpaired.sam\t\t100\t100\t1.00\t+\t.\t.");
    assert_eq!(lines[159], "NC_000913\tpaired.sam\t\t249\t249\t1.00\t+\t.\t.");

    // chr2 minus: [20, 25) from the single read, [200, 340) from the reverse pair
    assert_eq!(lines[160], "NC_000913\tpaired.sam\t\t20\t20\t1.00\t-\t.\t.");
    assert_eq!(lines[165], "NC_000913\tpaired.sam\t\t200\t200\t1.00\t-\t.\t.");
    assert_eq!(lines[304], "NC_000913\tpaired.sam\t\t339\t339\t1.00\t-\t.\t.");
}

#[rstest]
fn test_convert_refuses_to_overwrite_derived_output(path_to_paired_sam: PathBuf) {
    let (_tempdir, staged) = stage(&path_to_paired_sam);
    let config = ConversionConfig::default();

    let (output, _) = convert_alignment_file(&staged, None, &config).unwrap();
    let before = fs::read_to_string(&output).unwrap();

    let result = convert_alignment_file(&staged, None, &config);
    assert!(matches!(
        result,
        Err(CoverageError::Core(CoreError::OutputCollision(_)))
    ));
    assert_eq!(fs::read_to_string(&output).unwrap(), before);
}

#[rstest]
fn test_convert_to_explicit_output(path_to_paired_sam: PathBuf) {
    let tempdir = tempfile::tempdir().unwrap();
    let output = tempdir.path().join("coverage.gff");
    fs::write(&output, "stale\n").unwrap();

    let config = ConversionConfig {
        gff: GffOptions {
            seqid: SeqId::Reference,
            separate_strand: true,
            ..Default::default()
        },
        ..Default::default()
    };
    let (written, summary) =
        convert_alignment_file(&path_to_paired_sam, Some(&output), &config).unwrap();

    assert_eq!(written, output);
    assert_eq!(summary.lines, 305);

    let contents = fs::read_to_string(&output).unwrap();
    assert!(!contents.contains("stale"));
    assert!(contents.starts_with("chr1\tpaired.sam_(+)\t\t10\t10\t1.00\t+\t.\t.\n"));
    assert!(contents.ends_with("chr2\tpaired.sam_(-)\t\t339\t339\t1.00\t-\t.\t.\n"));
}

#[rstest]
fn test_flip_swaps_every_line(path_to_paired_sam: PathBuf) {
    let tempdir = tempfile::tempdir().unwrap();
    let plain = tempdir.path().join("plain.gff");
    let flipped = tempdir.path().join("flipped.gff");

    convert_alignment_file(&path_to_paired_sam, Some(&plain), &ConversionConfig::default())
        .unwrap();
    let config = ConversionConfig {
        flip: true,
        ..Default::default()
    };
    convert_alignment_file(&path_to_paired_sam, Some(&flipped), &config).unwrap();

    let plain = fs::read_to_string(plain).unwrap();
    let flipped = fs::read_to_string(flipped).unwrap();

    // every reference here is covered on one strand only, so order is preserved
    let swapped: Vec<String> = plain
        .lines()
        .map(|line| {
            let mut fields: Vec<&str> = line.split('\t').collect();
            fields[6] = if fields[6] == "+" { "-" } else { "+" };
            fields.join("\t")
        })
        .collect();
    assert_eq!(flipped.lines().collect::<Vec<_>>(), swapped);
}

#[rstest]
fn test_count_coverage_from_sam(path_to_paired_sam: PathBuf) {
    let mut source = open_alignment_source(&path_to_paired_sam).unwrap();
    assert!(!source.has_index());

    let tracks = count_coverage(source.as_mut(), &TrackSizing::default(), false).unwrap();

    assert_eq!(tracks.len(), 2);
    assert_eq!(tracks[0].name(), "chr1");
    assert_eq!(tracks[0].len(), 1001);
    assert_eq!(tracks[1].len(), 501);
    assert_eq!(tracks[0].total(Strand::Plus), 160);
    assert_eq!(tracks[0].total(Strand::Minus), 0);
    assert_eq!(tracks[1].total(Strand::Plus), 0);
    assert_eq!(tracks[1].total(Strand::Minus), 145);
}

#[rstest]
fn test_strategies_agree() {
    let mut eager_source = synthetic_source();
    let mut indexed_source = synthetic_source().with_index(true);

    let eager = accumulate(&EagerStrategy, &mut eager_source);
    let indexed = accumulate(&IndexedStrategy, &mut indexed_source);

    assert_eq!(eager.len(), 3);
    assert_eq!(eager, indexed);
    assert!(eager.iter().all(|t| t.total(Strand::Plus) > 0));
    assert!(eager.iter().all(|t| t.total(Strand::Minus) > 0));
}

#[rstest]
fn test_flip_equals_swapped_arrays() {
    let sizing = TrackSizing::with_fallback(1000);
    let plain = count_coverage(&mut synthetic_source(), &sizing, false).unwrap();
    let flipped = count_coverage(&mut synthetic_source(), &sizing, true).unwrap();

    for (plain, flipped) in plain.iter().zip(&flipped) {
        assert_eq!(plain.counts(Strand::Plus), flipped.counts(Strand::Minus));
        assert_eq!(plain.counts(Strand::Minus), flipped.counts(Strand::Plus));
    }
}

#[rstest]
fn test_coverage_is_additive_and_sparse() {
    let records = synthetic_records();
    let sizing = TrackSizing::with_fallback(1000);
    let mut source = InMemorySource::new(
        vec![
            ReferenceSequence::new("chrA", Some(500)),
            ReferenceSequence::new("chrB", Some(500)),
            ReferenceSequence::new("chrC", None),
        ],
        records.clone(),
    );
    let tracks = count_coverage(&mut source, &sizing, false).unwrap();

    // every covered base is the sum of the intervals over it, nothing else is covered
    for (reference_index, track) in tracks.iter().enumerate() {
        let mut expected = [vec![0u32; track.len()], vec![0u32; track.len()]];
        for record in records.iter().filter(|r| r.reference_index == reference_index) {
            if let Some(c) = contribution(record) {
                let side = match c.strand {
                    Strand::Plus => 0,
                    Strand::Minus => 1,
                };
                for count in &mut expected[side][c.start..c.end] {
                    *count += 1;
                }
            }
        }
        assert_eq!(track.counts(Strand::Plus), expected[0].as_slice());
        assert_eq!(track.counts(Strand::Minus), expected[1].as_slice());
    }

    // the writer emits exactly the non-zero bases
    let nonzero: usize = tracks
        .iter()
        .map(|t| t.nonzero(Strand::Plus).count() + t.nonzero(Strand::Minus).count())
        .sum();
    let mut out = Vec::new();
    let summary = convert_source_to_gff(
        &mut InMemorySource::new(source.references().to_vec(), records),
        "synthetic",
        &ConversionConfig {
            sizing,
            ..Default::default()
        },
        &mut out,
    )
    .unwrap();
    assert_eq!(summary.lines as usize, nonzero);
    assert_eq!(String::from_utf8(out).unwrap().lines().count(), nonzero);
}

#[rstest]
fn test_interval_past_fallback_length_is_an_error() {
    let mut source = InMemorySource::new(
        vec![ReferenceSequence::new("plasmid", None)],
        vec![AlignedRecord {
            start: 90,
            alignment_end: 120,
            ..Default::default()
        }],
    );

    let result = count_coverage(&mut source, &TrackSizing::with_fallback(100), false);
    assert!(matches!(
        result,
        Err(CoverageError::OutOfBounds { end: 120, length: 100, .. })
    ));
}

#[rstest]
fn test_declared_length_wins_over_fallback(path_to_paired_sam: PathBuf) {
    let mut source = SamSource::open(&path_to_paired_sam).unwrap();

    let tracks = count_coverage(&mut source, &TrackSizing::with_fallback(5), false).unwrap();
    assert_eq!(tracks[0].len(), 1001);
    assert_eq!(tracks[1].len(), 501);
}

#[rstest]
fn test_unsupported_input() {
    let tempdir = tempfile::tempdir().unwrap();
    let path = tempdir.path().join("reads.cram");
    fs::write(&path, "").unwrap();

    assert!(matches!(
        convert_alignment_file(&path, None, &ConversionConfig::default()),
        Err(CoverageError::Core(CoreError::UnderivableOutputPath(_)))
    ));
    assert!(matches!(
        open_alignment_source(&path),
        Err(CoverageError::UnsupportedInput(_))
    ));
}

#[rstest]
fn test_indexed_strategy_requested_without_index(path_to_paired_sam: PathBuf) {
    let (tempdir, staged) = stage(&path_to_paired_sam);
    let indexed = ConversionConfig {
        strategy: StrategyChoice::Indexed,
        ..Default::default()
    };

    let result = convert_alignment_file(&staged, None, &indexed);
    assert!(matches!(result, Err(CoverageError::MissingIndex)));
    assert!(!tempdir.path().join("paired.gff").exists());

    // nothing was left behind to collide with
    let (output, summary) =
        convert_alignment_file(&staged, None, &ConversionConfig::default()).unwrap();
    assert_eq!(output, tempdir.path().join("paired.gff"));
    assert_eq!(summary.lines, 305);
}

#[rstest]
fn test_rejected_strategy_keeps_explicit_output(path_to_paired_sam: PathBuf) {
    let tempdir = tempfile::tempdir().unwrap();
    let output = tempdir.path().join("coverage.gff");
    fs::write(&output, "previous\n").unwrap();

    let config = ConversionConfig {
        strategy: StrategyChoice::Indexed,
        ..Default::default()
    };
    let result = convert_alignment_file(&path_to_paired_sam, Some(&output), &config);

    assert!(matches!(result, Err(CoverageError::MissingIndex)));
    assert_eq!(fs::read_to_string(&output).unwrap(), "previous\n");
}

#[rstest]
fn test_failed_conversion_removes_output() {
    let tempdir = tempfile::tempdir().unwrap();
    let sam_path = tempdir.path().join("short.sam");
    fs::write(
        &sam_path,
        "@SQ\tSN:chr1\tLN:100\nr1\t99\tchr1\t51\t60\t10M\t=\t151\t200\t*\t*\n",
    )
    .unwrap();

    let result = convert_alignment_file(&sam_path, None, &ConversionConfig::default());

    assert!(matches!(
        result,
        Err(CoverageError::OutOfBounds { end: 250, length: 101, .. })
    ));
    assert!(!tempdir.path().join("short.gff").exists());
}

/// Re-encode a SAM file as BAM.
fn write_bam(sam_path: &Path, bam_path: &Path) {
    let mut reader = File::open(sam_path)
        .map(BufReader::new)
        .map(sam::io::Reader::new)
        .unwrap();
    let header = reader.read_header().unwrap();

    let mut writer = File::create(bam_path).map(bam::io::Writer::new).unwrap();
    writer.write_header(&header).unwrap();
    for result in reader.records() {
        let record = result.unwrap();
        writer.write_alignment_record(&header, &record).unwrap();
    }
    writer.try_finish().unwrap();
}

/// Write `<file>.bam.bai` for a coordinate sorted BAM file.
fn index_bam(bam_path: &Path) {
    let mut reader = File::open(bam_path).map(bam::io::Reader::new).unwrap();
    let header = reader.read_header().unwrap();

    let mut indexer = Indexer::default();
    let mut chunk_start = reader.get_ref().virtual_position();
    let mut record = bam::Record::default();

    while reader.read_record(&mut record).unwrap() != 0 {
        let chunk_end = reader.get_ref().virtual_position();

        let alignment_context = match (
            record.reference_sequence_id().transpose().unwrap(),
            record.alignment_start().transpose().unwrap(),
            record.alignment_end().transpose().unwrap(),
        ) {
            (Some(id), Some(start), Some(end)) => {
                Some((id, start, end, !record.flags().is_unmapped()))
            }
            _ => None,
        };
        indexer
            .add_record(alignment_context, Chunk::new(chunk_start, chunk_end))
            .unwrap();

        chunk_start = chunk_end;
    }

    let index: bam::bai::Index = indexer.build(header.reference_sequences().len());
    bam::bai::write(bam_index_path(bam_path), &index).unwrap();
}

/// The paired fixture as `paired.bam` in a fresh directory, indexed on request.
fn stage_bam(sam_path: &Path, indexed: bool) -> (tempfile::TempDir, PathBuf) {
    let tempdir = tempfile::tempdir().unwrap();
    let bam_path = tempdir.path().join("paired.bam");
    write_bam(sam_path, &bam_path);
    if indexed {
        index_bam(&bam_path);
    }
    (tempdir, bam_path)
}

#[rstest]
fn test_bam_index_is_detected(path_to_paired_sam: PathBuf) {
    let (_tempdir, bam_path) = stage_bam(&path_to_paired_sam, false);
    assert!(!BamSource::open(&bam_path).unwrap().has_index());

    index_bam(&bam_path);
    assert!(BamSource::open(&bam_path).unwrap().has_index());
    assert!(open_alignment_source(&bam_path).unwrap().has_index());
}

#[rstest]
fn test_bam_strategies_agree_with_sam(path_to_paired_sam: PathBuf) {
    let (_tempdir, bam_path) = stage_bam(&path_to_paired_sam, true);

    let from_sam = accumulate(
        &EagerStrategy,
        &mut SamSource::open(&path_to_paired_sam).unwrap(),
    );
    let eager = accumulate(&EagerStrategy, &mut BamSource::open(&bam_path).unwrap());
    let indexed = accumulate(&IndexedStrategy, &mut BamSource::open(&bam_path).unwrap());

    assert_eq!(eager, from_sam);
    assert_eq!(indexed, eager);

    let totals: Vec<(u64, u64)> = indexed
        .iter()
        .map(|t| (t.total(Strand::Plus), t.total(Strand::Minus)))
        .collect();
    assert_eq!(totals, vec![(160, 0), (0, 145)]);
}

#[rstest]
fn test_parallel_matches_sequential(path_to_paired_sam: PathBuf) {
    let (tempdir, bam_path) = stage_bam(&path_to_paired_sam, true);
    let sizing = TrackSizing::with_fallback(1000);

    let mut tracks = Vec::new();
    par_indexed_bam_coverage(&bam_path, &sizing, 2, &mut |track| {
        tracks.push(track);
        Ok(())
    })
    .unwrap();
    let eager = accumulate(&EagerStrategy, &mut BamSource::open(&bam_path).unwrap());
    assert_eq!(tracks, eager);

    let single = tempdir.path().join("single.gff");
    let pooled = tempdir.path().join("pooled.gff");
    for (output, threads) in [(&single, 1), (&pooled, 2)] {
        let config = ConversionConfig {
            threads,
            ..Default::default()
        };
        let (_, summary) =
            convert_alignment_file(&bam_path, Some(output.as_path()), &config).unwrap();
        assert_eq!(summary.references, 2);
        assert_eq!(summary.lines, 305);
    }

    let single = fs::read_to_string(single).unwrap();
    assert_eq!(fs::read_to_string(pooled).unwrap(), single);
    assert!(single.starts_with("NC_000913\tpaired.bam\t\t10\t10\t1.00\t+\t.\t.\n"));
}

#[rstest]
fn test_parallel_requires_index(path_to_paired_sam: PathBuf) {
    let (_tempdir, bam_path) = stage_bam(&path_to_paired_sam, false);

    let result =
        par_indexed_bam_coverage(&bam_path, &TrackSizing::default(), 2, &mut |_| Ok(()));
    assert!(matches!(result, Err(CoverageError::MissingIndex)));
}
