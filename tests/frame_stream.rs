//! Integration tests for frame extraction from replay byte streams.

use std::{
    collections::VecDeque,
    io::{self, Cursor, Read},
};

use proptest::{
    collection::vec,
    prelude::any,
    test_runner::{Config as ProptestConfig, RngAlgorithm, TestCaseError, TestRng, TestRunner},
};
use replayframe::{FrameError, HEADER_SIZE, ReplayReader};
use rstest::rstest;

/// Assemble one well-formed frame: `[timestamp BE][length BE][payload]`.
fn frame_bytes(timestamp: u32, payload: &[u8]) -> Vec<u8> {
    let length = u32::try_from(payload.len()).expect("test payload fits u32");
    let mut bytes = Vec::with_capacity(HEADER_SIZE + payload.len());
    bytes.extend_from_slice(&timestamp.to_be_bytes());
    bytes.extend_from_slice(&length.to_be_bytes());
    bytes.extend_from_slice(payload);
    bytes
}

/// A stream that replays a script of read outcomes, then reports EOF.
struct ScriptedStream {
    steps: VecDeque<io::Result<Vec<u8>>>,
}

impl ScriptedStream {
    fn new(steps: impl IntoIterator<Item = io::Result<Vec<u8>>>) -> Self {
        Self {
            steps: steps.into_iter().collect(),
        }
    }
}

impl Read for ScriptedStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.steps.pop_front() {
            None => Ok(0),
            Some(Err(error)) => Err(error),
            Some(Ok(bytes)) => {
                let n = bytes.len().min(buf.len());
                buf[..n].copy_from_slice(&bytes[..n]);
                if n < bytes.len() {
                    self.steps.push_front(Ok(bytes[n..].to_vec()));
                }
                Ok(n)
            }
        }
    }
}

#[test]
fn documented_example_decodes_one_frame() {
    let bytes: [u8; 11] = [
        0x00, 0x00, 0x00, 0x05, 0x00, 0x00, 0x00, 0x03, 0x61, 0x62, 0x63,
    ];
    let mut reader = ReplayReader::new(Cursor::new(bytes));

    let mut packet = reader.next_frame().expect("frame").expect("frame");
    assert_eq!(packet.timestamp(), 5);
    assert_eq!(packet.len(), 3);
    assert_eq!(packet.read_bytes(3).expect("payload"), &b"abc"[..]);

    assert!(reader.next_frame().expect("clean end").is_none());
    assert_eq!(reader.last_error(), None);
}

#[test]
fn yields_frames_in_order_then_clean_end() {
    let mut stream = Vec::new();
    let payloads: [&[u8]; 3] = [b"first", b"", b"third frame payload"];
    for (index, payload) in payloads.iter().enumerate() {
        let timestamp = u32::try_from(index).expect("small index") * 100;
        stream.extend_from_slice(&frame_bytes(timestamp, payload));
    }
    let mut reader = ReplayReader::new(Cursor::new(stream));

    for (index, expected) in payloads.iter().enumerate() {
        let mut packet = reader.next_frame().expect("frame").expect("frame");
        let timestamp = u32::try_from(index).expect("small index") * 100;
        assert_eq!(packet.timestamp(), timestamp);
        assert_eq!(packet.len(), expected.len());
        assert_eq!(
            packet.read_bytes(expected.len()).expect("payload"),
            *expected
        );
    }

    assert!(reader.next_frame().expect("clean end").is_none());
    assert_eq!(reader.last_error(), None);
}

#[test]
fn empty_stream_is_a_clean_end() {
    let mut reader = ReplayReader::new(Cursor::new(Vec::<u8>::new()));
    assert!(reader.next_frame().expect("clean end").is_none());
    assert_eq!(reader.last_error(), None);
}

/// A stream cut anywhere inside a frame is an error end, and the error is
/// retrievable from `last_error` afterward.
#[rstest]
#[case::one_timestamp_byte(1)]
#[case::mid_timestamp(3)]
#[case::between_header_fields(4)]
#[case::mid_length(6)]
#[case::length_complete_no_payload(8)]
#[case::mid_payload(10)]
fn truncated_stream_is_an_error_end(#[case] cut: usize) {
    let full = frame_bytes(42, b"data");
    let mut reader = ReplayReader::new(Cursor::new(full[..cut].to_vec()));

    let expected = if cut < HEADER_SIZE {
        FrameError::TruncatedHeader {
            bytes_received: cut,
            header_size: HEADER_SIZE,
        }
    } else {
        FrameError::TruncatedPayload {
            bytes_received: cut - HEADER_SIZE,
            expected: 4,
        }
    };

    let error = reader.next_frame().expect_err("truncated frame");
    assert_eq!(error, expected);
    assert!(error.is_truncation());
    assert_eq!(reader.last_error(), Some(&expected));
}

#[test]
fn truncation_after_complete_frames_still_yields_them() {
    let mut stream = frame_bytes(1, b"ok");
    stream.extend_from_slice(&frame_bytes(2, b"ok too"));
    stream.extend_from_slice(&[0x00, 0x00]); // dangling header fragment

    let mut reader = ReplayReader::new(Cursor::new(stream));
    assert_eq!(
        reader
            .next_frame()
            .expect("frame")
            .expect("frame")
            .timestamp(),
        1
    );
    assert_eq!(
        reader
            .next_frame()
            .expect("frame")
            .expect("frame")
            .timestamp(),
        2
    );

    let error = reader.next_frame().expect_err("dangling bytes");
    assert_eq!(
        error,
        FrameError::TruncatedHeader {
            bytes_received: 2,
            header_size: HEADER_SIZE,
        }
    );
}

#[test]
fn stream_failure_is_surfaced_and_stored() {
    let mut reader = ReplayReader::new(ScriptedStream::new([Err(io::Error::new(
        io::ErrorKind::BrokenPipe,
        "stream reset",
    ))]));

    let error = reader.next_frame().expect_err("broken stream");
    assert_eq!(
        error,
        FrameError::Io {
            kind: io::ErrorKind::BrokenPipe,
            message: "stream reset".to_owned(),
        }
    );
    assert!(!error.is_truncation());
    assert_eq!(reader.last_error(), Some(&error));
}

#[test]
fn last_error_reflects_the_most_recent_outcome() {
    // First call fails, the stream then recovers with a full frame.
    let mut reader = ReplayReader::new(ScriptedStream::new([
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "stream reset")),
        Ok(frame_bytes(7, b"after")),
    ]));

    reader.next_frame().expect_err("broken stream");
    assert!(reader.last_error().is_some());

    let packet = reader.next_frame().expect("frame").expect("frame");
    assert_eq!(packet.timestamp(), 7);
    assert_eq!(reader.last_error(), None);
}

#[test]
fn frames_arriving_one_byte_at_a_time_still_decode() {
    let full = frame_bytes(9, b"chunked");
    let steps = full.iter().map(|&byte| Ok(vec![byte]));
    let mut reader = ReplayReader::new(ScriptedStream::new(steps));

    let mut packet = reader.next_frame().expect("frame").expect("frame");
    assert_eq!(packet.timestamp(), 9);
    assert_eq!(packet.read_bytes(7).expect("payload"), &b"chunked"[..]);
    assert!(reader.next_frame().expect("clean end").is_none());
}

#[test]
fn interrupted_reads_are_retried() {
    let mut reader = ReplayReader::new(ScriptedStream::new([
        Err(io::Error::new(io::ErrorKind::Interrupted, "signal")),
        Ok(frame_bytes(3, b"resumed")),
    ]));

    let packet = reader.next_frame().expect("frame").expect("frame");
    assert_eq!(packet.timestamp(), 3);
}

#[test]
fn frames_iterator_yields_then_fuses_on_clean_end() {
    let mut stream = frame_bytes(1, b"a");
    stream.extend_from_slice(&frame_bytes(2, b"bc"));
    let mut reader = ReplayReader::new(Cursor::new(stream));

    let mut frames = reader.frames();
    assert_eq!(frames.next().expect("frame").expect("frame").timestamp(), 1);
    assert_eq!(frames.next().expect("frame").expect("frame").timestamp(), 2);
    assert!(frames.next().is_none());
    assert!(frames.next().is_none());
}

#[test]
fn frames_iterator_yields_one_error_then_fuses() {
    let full = frame_bytes(1, b"payload");
    let mut reader = ReplayReader::new(Cursor::new(full[..HEADER_SIZE + 2].to_vec()));

    let mut frames = reader.frames();
    let outcome = frames.next().expect("error item");
    assert!(outcome.is_err());
    assert!(frames.next().is_none());
}

fn deterministic_runner(cases: u32) -> TestRunner {
    let config = ProptestConfig {
        cases,
        ..ProptestConfig::default()
    };
    let rng = TestRng::deterministic_rng(RngAlgorithm::ChaCha);
    TestRunner::new_with_rng(config, rng)
}

#[test]
fn generated_frame_sequences_decode_in_order() {
    let mut runner = deterministic_runner(96);
    let strategy = vec((any::<u32>(), vec(any::<u8>(), 0..64)), 0..8);

    runner
        .run(&strategy, |frames| {
            let mut stream = Vec::new();
            for (timestamp, payload) in &frames {
                stream.extend_from_slice(&frame_bytes(*timestamp, payload));
            }

            let mut reader = ReplayReader::new(Cursor::new(stream));
            for (timestamp, payload) in &frames {
                let mut packet = reader
                    .next_frame()
                    .map_err(|err| TestCaseError::fail(format!("decode failed: {err}")))?
                    .ok_or_else(|| TestCaseError::fail("missing frame".to_owned()))?;
                proptest::prop_assert_eq!(packet.timestamp(), *timestamp);
                proptest::prop_assert_eq!(packet.len(), payload.len());
                let bytes = packet
                    .read_bytes(payload.len())
                    .map_err(|err| TestCaseError::fail(format!("payload read failed: {err}")))?;
                proptest::prop_assert_eq!(bytes.as_ref(), payload.as_slice());
            }
            let end = reader
                .next_frame()
                .map_err(|err| TestCaseError::fail(format!("expected clean end: {err}")))?;
            proptest::prop_assert!(end.is_none());
            Ok(())
        })
        .expect("generated frame sequences should decode in order");
}
