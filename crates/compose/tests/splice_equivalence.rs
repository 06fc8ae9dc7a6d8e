//! Splicing a chunk produced at a quality must yield exactly the bytes the
//! composer writes when compressing the same input itself at that quality.

use std::io::Write;

use compose::{ComposeOptions, CompositeStream, ContainerFormat};
use precompress::{Quality, compress_chunk};
use test_support::{SAMPLE_TEXT, patterned_payload};

fn compose(
    format: ContainerFormat,
    writer: impl FnOnce(&mut CompositeStream<Vec<u8>>),
) -> Vec<u8> {
    let mut stream = CompositeStream::with_options(Vec::new(), ComposeOptions::new(format));
    writer(&mut stream);
    stream.finish().expect("finish")
}

#[test]
fn raw_write_matches_spliced_chunk() {
    for format in [ContainerFormat::Gzip, ContainerFormat::Deflate] {
        for &quality in Quality::all() {
            let raw = compose(format, |s| {
                s.set_quality(quality).expect("quality");
                s.write_all(SAMPLE_TEXT).expect("write");
            });
            let spliced = compose(format, |s| {
                let chunk = compress_chunk(SAMPLE_TEXT, quality).expect("compress");
                s.write_precompressed(&chunk).expect("splice");
            });
            assert_eq!(raw, spliced, "{format} at {quality}");
        }
    }
}

#[test]
fn quality_switching_sequence_matches_spliced_chunks() {
    for start in 0..3 {
        let sequence: Vec<Quality> = (0..3).map(|i| Quality::all()[(start + i) % 3]).collect();

        let raw = compose(ContainerFormat::Gzip, |s| {
            for &quality in &sequence {
                s.set_quality(quality).expect("quality");
                s.write_all(SAMPLE_TEXT).expect("write");
            }
        });
        let spliced = compose(ContainerFormat::Gzip, |s| {
            for &quality in &sequence {
                let chunk = compress_chunk(SAMPLE_TEXT, quality).expect("compress");
                s.write_precompressed(&chunk).expect("splice");
            }
        });
        assert_eq!(raw, spliced, "sequence {sequence:?}");
    }
}

#[test]
fn large_payload_matches_spliced_chunk() {
    let data = patterned_payload(150 * 1024);
    for &quality in Quality::all() {
        let raw = compose(ContainerFormat::Deflate, |s| {
            s.set_quality(quality).expect("quality");
            s.write_all(&data).expect("write");
        });
        let spliced = compose(ContainerFormat::Deflate, |s| {
            let chunk = compress_chunk(&data, quality).expect("compress");
            s.write_precompressed(&chunk).expect("splice");
        });
        assert_eq!(raw, spliced, "{quality}");
    }
}

#[test]
fn spliced_body_is_chunk_minus_final_block() {
    for &quality in Quality::all() {
        let chunk = compress_chunk(SAMPLE_TEXT, quality).expect("compress");
        let out = compose(ContainerFormat::Deflate, |s| {
            s.write_precompressed(&chunk).expect("splice");
        });
        // One chunk: stripping and re-appending the same final block is a no-op.
        assert_eq!(out, chunk);
    }
}
