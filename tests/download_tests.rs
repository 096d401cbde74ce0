//! Tests for the download module functionality.
//!
//! This file contains tests for:
//! - DownloadRequest creation and header handling
//! - Segment planning
//! - Conflict policy parsing
//! - Destination paths

use ants::download::{plan_segments, ConflictPolicy, Destination, DownloadRequest, Segment};
use reqwest::header::RANGE;
use reqwest::Url;
use std::path::Path;

mod common;
use common::helpers::*;

#[test]
fn test_try_from_url() {
    let u = Url::parse(TEST_DOMAIN).unwrap();
    let r = DownloadRequest::try_from(&u).unwrap();
    assert_eq!(r.url, u);
}

#[test]
fn test_try_from_string() {
    let r = create_test_request();
    assert_eq!(r.url.as_str(), TEST_DOMAIN);
    assert!(r.filename.is_none());
}

#[test]
fn test_each_segment_gets_its_own_range() {
    let r = create_test_request().with_headers(create_test_headers());
    let segments = plan_segments(10_000_000, 4);

    let ranges: Vec<String> = segments
        .iter()
        .filter_map(|s| r.range_headers(s))
        .map(|h| h.get(RANGE).unwrap().to_str().unwrap().to_string())
        .collect();

    assert_eq!(
        ranges,
        vec![
            "bytes=0-2499999",
            "bytes=2500000-4999999",
            "bytes=5000000-7499999",
            "bytes=7500000-9999999",
        ]
    );
    assert!(r.headers.get(RANGE).is_none());
}

#[test]
fn test_plan_concrete_scenarios() {
    assert_eq!(
        plan_segments(10_000_000, 4),
        vec![
            Segment::new(0, 2_500_000),
            Segment::new(2_500_000, 5_000_000),
            Segment::new(5_000_000, 7_500_000),
            Segment::new(7_500_000, 10_000_000),
        ]
    );
    assert_eq!(
        plan_segments(7, 4),
        vec![
            Segment::new(0, 1),
            Segment::new(1, 2),
            Segment::new(2, 3),
            Segment::new(3, 7),
        ]
    );
}

#[test]
fn test_plan_total_length() {
    for len in [1u64, 99, 4096, 1_000_003] {
        for workers in [1usize, 3, 8, 40] {
            let total: u64 = plan_segments(len, workers).iter().map(Segment::len).sum();
            assert_eq!(total, len);
        }
    }
}

#[test]
fn test_conflict_policy_from_str() {
    assert_eq!("overwrite".parse::<ConflictPolicy>().unwrap(), ConflictPolicy::Overwrite);
    assert_eq!("skip".parse::<ConflictPolicy>().unwrap(), ConflictPolicy::Skip);
    assert_eq!("rename".parse::<ConflictPolicy>().unwrap(), ConflictPolicy::Rename);
    assert_eq!("raise".parse::<ConflictPolicy>().unwrap(), ConflictPolicy::Raise);
    assert!("ignore".parse::<ConflictPolicy>().is_err());
}

#[test]
fn test_destination_paths() {
    let d = Destination::new(Path::new("out"), "movie.mkv");
    assert_eq!(d.final_path(), Path::new("out/movie.mkv"));
    assert_eq!(d.part_path(), Path::new("out/movie.mkv.part"));
}
