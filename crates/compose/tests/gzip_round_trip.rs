//! Gzip composition: raw writes, spliced chunks and quality switches all decode
//! to the concatenated input.

use std::io::Write;

use compose::{CompositeStream, format::gzip_header};
use precompress::{Quality, compress_chunk};
use test_support::{SAMPLE_TEXT, inflate_gzip_body, repeat_payload};

const INPUTS: [&[u8]; 3] = [b"", b"a", SAMPLE_TEXT];

fn pre_gzip(writer: impl FnOnce(&mut CompositeStream<Vec<u8>>)) -> Vec<u8> {
    let mut stream = CompositeStream::gzip(Vec::new());
    writer(&mut stream);
    stream.finish().expect("finish")
}

fn decode(data: &[u8]) -> Vec<u8> {
    inflate_gzip_body(data).expect("gzip body inflates")
}

#[test]
fn raw_write_round_trips() {
    for input in INPUTS {
        let data = pre_gzip(|s| s.write_all(input).expect("write"));
        if input.is_empty() {
            assert!(data.is_empty(), "empty input writes no header");
        } else {
            assert_eq!(decode(&data), input);
        }
    }
}

#[test]
fn mixed_quality_raw_writes_round_trip() {
    for input in INPUTS {
        let data = pre_gzip(|s| {
            s.set_quality(Quality::Maximum).expect("quality");
            s.write_all(input).expect("write");
            s.set_quality(Quality::Store).expect("quality");
            s.write_all(input).expect("write");
        });
        if input.is_empty() {
            assert!(data.is_empty());
        } else {
            assert_eq!(decode(&data), repeat_payload(input, 2));
        }
    }
}

#[test]
fn repeated_chunks_round_trip() {
    for times in [0usize, 1, 2, 10] {
        for &quality in Quality::all() {
            let chunk = compress_chunk(SAMPLE_TEXT, quality).expect("compress");
            let data = pre_gzip(|s| {
                for _ in 0..times {
                    s.write_precompressed(&chunk).expect("splice");
                }
            });
            if times == 0 {
                assert!(data.is_empty());
            } else {
                assert_eq!(
                    decode(&data),
                    repeat_payload(SAMPLE_TEXT, times),
                    "{times} x {quality}"
                );
            }
        }
    }
}

#[test]
fn chunks_of_different_qualities_round_trip() {
    for start in 0..3 {
        let data = pre_gzip(|s| {
            for i in 0..3 {
                let quality = Quality::all()[(start + i) % 3];
                let chunk = compress_chunk(SAMPLE_TEXT, quality).expect("compress");
                s.write_precompressed(&chunk).expect("splice");
            }
        });
        assert_eq!(decode(&data), repeat_payload(SAMPLE_TEXT, 3));
    }
}

#[test]
fn chunks_and_raw_writes_interleave() {
    let cached = compress_chunk(b"<cached/>", Quality::Store).expect("compress");
    let data = pre_gzip(|s| {
        s.write_all(b"<fresh>").expect("write");
        s.write_precompressed(&cached).expect("splice");
        s.write_all(b"</fresh>").expect("write");
        s.write_precompressed(&cached).expect("splice");
    });
    assert_eq!(decode(&data), b"<fresh><cached/></fresh><cached/>");
}

#[test]
fn header_tags_first_content_quality_only() {
    let data = pre_gzip(|s| {
        s.set_quality(Quality::Store).expect("quality");
        s.write_all(SAMPLE_TEXT).expect("write");
        s.set_quality(Quality::Maximum).expect("quality");
        s.write_all(SAMPLE_TEXT).expect("write");
    });
    assert_eq!(data[..10], gzip_header(Quality::Store));
    assert_eq!(data[8], 0x00);

    let stored = compress_chunk(SAMPLE_TEXT, Quality::Store).expect("compress");
    let data = pre_gzip(|s| {
        s.write_all(SAMPLE_TEXT).expect("write");
        s.write_precompressed(&stored).expect("splice");
    });
    assert_eq!(data[..10], [0x1F, 0x8B, 0x08, 0, 0, 0, 0, 0, 0x02, 0]);
}

#[test]
fn fast_and_maximum_share_header_tag() {
    for quality in [Quality::Maximum, Quality::Fast] {
        let data = pre_gzip(|s| {
            s.set_quality(quality).expect("quality");
            s.write_all(b"x").expect("write");
        });
        assert_eq!(data[8], 0x02, "{quality}");
    }
}

#[test]
fn output_ends_with_terminal_of_last_content() {
    for &quality in Quality::all() {
        let data = pre_gzip(|s| {
            s.write_all(b"prefix").expect("write");
            s.set_quality(quality).expect("quality");
            s.write_all(SAMPLE_TEXT).expect("write");
        });
        if quality.is_store() {
            assert_eq!(
                data[data.len() - 9..],
                [0x00, 0x00, 0xFF, 0xFF, 0x01, 0x00, 0x00, 0xFF, 0xFF]
            );
        } else {
            assert_eq!(data[data.len() - 6..], [0x00, 0x00, 0xFF, 0xFF, 0x03, 0x00]);
        }
    }
}

#[test]
fn no_trailer_follows_the_terminator() {
    let data = pre_gzip(|s| s.write_all(SAMPLE_TEXT).expect("write"));
    assert!(data.ends_with(&[0x00, 0x00, 0xFF, 0xFF, 0x03, 0x00]));
}
