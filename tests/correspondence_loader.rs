use fieldmorph::{Correspondences, LineSegment, MorphError, Vec2};
use std::fs;

#[test]
fn loads_two_pairs_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pairs.txt");
    fs::write(&path, "2\n10 20 30 40 11 21 31 41\n0.5 1.5 2.5 3.5 4 5 6 7\n").unwrap();

    let set = Correspondences::load(&path).unwrap();
    assert_eq!(set.source().len(), 2);
    assert_eq!(set.target().len(), 2);
    assert_eq!(
        set.source()[0],
        LineSegment::new(Vec2::new(10.0, 20.0), Vec2::new(30.0, 40.0))
    );
    assert_eq!(
        set.target()[0],
        LineSegment::new(Vec2::new(11.0, 21.0), Vec2::new(31.0, 41.0))
    );
    assert_eq!(
        set.source()[1],
        LineSegment::new(Vec2::new(0.5, 1.5), Vec2::new(2.5, 3.5))
    );
    assert_eq!(
        set.target()[1],
        LineSegment::new(Vec2::new(4.0, 5.0), Vec2::new(6.0, 7.0))
    );
}

#[test]
fn short_file_fails_to_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("short.txt");
    fs::write(&path, "3\n0 0 1 0 0 0 1 0\n0 1 1 1 0 1 1 1\n").unwrap();

    let err = Correspondences::load(&path).unwrap_err();
    assert_eq!(
        err,
        MorphError::TruncatedCorrespondences {
            expected: 3,
            found: 2,
        }
    );
}

#[test]
fn missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.txt");
    match Correspondences::load(&path).unwrap_err() {
        MorphError::CorrespondenceIo { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn display_output_parses_back() {
    let set = Correspondences::from_pairs([
        (
            LineSegment::from_coords(1.25, -3.0, 7.0, 8.125),
            LineSegment::from_coords(0.1, 0.2, 0.3, 0.4),
        ),
        (
            LineSegment::from_coords(100.0, 200.0, 300.0, 400.0),
            LineSegment::from_coords(-1e-3, 5.5, 6.0, 1e6),
        ),
    ]);
    let text = set.to_string();
    assert!(text.starts_with("2\n"));
    let parsed: Correspondences = text.parse().unwrap();
    assert_eq!(parsed, set);
}
