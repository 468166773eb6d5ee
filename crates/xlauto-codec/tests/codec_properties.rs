//! End-to-end behaviour of the range codec

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use xlauto_codec::{decode, encode, DecodeError, Grid};

const SAMPLE_ENCODING: &str = "2#5#3#abc2#de4#fghi1#34#52352#234#53530#4#32532#32";

fn sample_grid() -> Grid {
    Grid::from_rows(vec![
        vec!["abc", "de", "fghi", "3", "5235"],
        vec!["23", "5353", "", "3253", "32"],
    ])
    .unwrap()
}

#[test]
fn test_two_by_five_sample_encodes_exactly() {
    assert_eq!(encode(&sample_grid()), SAMPLE_ENCODING);
}

#[test]
fn test_two_by_five_sample_decodes_exactly() {
    let grid = decode(SAMPLE_ENCODING).unwrap();
    assert_eq!(grid, sample_grid());
    assert_eq!(grid.get(1, 2), Some(""));
}

#[test]
fn test_empty_grid_is_canonical() {
    assert_eq!(encode(&Grid::new()), "0#");
    assert_eq!(decode("0#").unwrap(), Grid::new());
}

#[test]
fn test_embedded_delimiters_roundtrip() {
    let grid = Grid::from_rows(vec![vec!["#", "3#ab"], vec!["##", "0#"]]).unwrap();
    let encoded = encode(&grid);
    assert_eq!(encoded, "2#2#1##4#3#ab2###2#0#");
    assert_eq!(decode(&encoded).unwrap(), grid);
}

#[test]
fn test_missing_cells_rejected() {
    let err = decode("2#3#").unwrap_err();
    assert!(!err.is_no_data());
    assert!(matches!(err, DecodeError::UnexpectedEnd { .. }));
}

#[test]
fn test_non_positive_counts_fail_identically() {
    let zero = decode("0#5#").unwrap_err();
    let negative = decode("-1#2#").unwrap_err();
    assert_eq!(zero, negative);
    assert!(zero.is_no_data());
    assert_eq!(zero.to_string(), negative.to_string());

    assert_eq!(decode("3#0#"), Err(DecodeError::NoData));
    assert_eq!(decode("3#-4#"), Err(DecodeError::NoData));
}

#[test]
fn test_partial_input_never_yields_grid() {
    // Every strict prefix of a valid encoding must be rejected
    let encoded = SAMPLE_ENCODING;
    for end in 0..encoded.len() {
        assert!(
            decode(&encoded[..end]).is_err(),
            "prefix {:?} decoded unexpectedly",
            &encoded[..end]
        );
    }
}

fn grid_strategy() -> impl Strategy<Value = Grid> {
    (0usize..6, 1usize..6).prop_flat_map(|(rows, columns)| {
        prop::collection::vec(
            prop::collection::vec("[a-z0-9#\\- \u{e9}\u{4e2d}]{0,8}", columns),
            rows,
        )
        .prop_map(|rows| Grid::from_rows(rows).unwrap())
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_decode_inverts_encode(grid in grid_strategy()) {
        let encoded = encode(&grid);
        prop_assert_eq!(decode(&encoded).unwrap(), grid);
    }

    #[test]
    fn prop_encode_inverts_decode(grid in grid_strategy()) {
        let encoded = encode(&grid);
        let decoded = decode(&encoded).unwrap();
        prop_assert_eq!(encode(&decoded), encoded);
    }

    #[test]
    fn prop_arbitrary_input_never_panics(input in "[0-9#a\\-]{0,24}") {
        let _ = decode(&input);
    }
}
