//! Tests for the `map:` text format

use pretty_assertions::assert_eq;
use tempfile::NamedTempFile;
use tilemap_engine::{
    formats::{parse_map, write_map},
    CellError, HeaderError, HeaderField, MapFormat, Size, TileGrid, TileMapError,
};

use super::{numbered_grid, rows};

const SAMPLE: &str = "map:\nwidth: 2\nheight: 2\nlayers: 1\n  1, 0,\n  0, 2,\n";

// ============================================================================
// Parsing
// ============================================================================

#[test]
fn test_parse_sample_map() {
    let grid = parse_map(SAMPLE.as_bytes()).unwrap();
    assert_eq!(grid.size(), Size::new(2, 2));
    assert_eq!(grid.layer_count(), 1);
    assert_eq!(rows(&grid, 0), vec![vec![1, 0], vec![0, 2]]);
}

#[test]
fn test_parse_ignores_layout_whitespace() {
    let grid = parse_map(b"\n\t  map:width:3 height:\n1\tlayers:  2 1,2,3,\n4 ,5 ,\t6 ,   \n\n").unwrap();
    assert_eq!(rows(&grid, 0), vec![vec![1, 2, 3]]);
    assert_eq!(rows(&grid, 1), vec![vec![4, 5, 6]]);
}

#[test]
fn test_parse_accepts_max_tile_value() {
    let grid = parse_map(b"map: width: 1 height: 1 layers: 1 255,").unwrap();
    assert_eq!(grid.tile(0, (0, 0)), 255);
}

#[test]
fn test_parse_accepts_crlf() {
    let grid = parse_map(b"map:\r\nwidth: 1\r\nheight: 1\r\nlayers: 1\r\n 9,\r\n").unwrap();
    assert_eq!(grid.tile(0, (0, 0)), 9);
}

// ============================================================================
// Header errors
// ============================================================================

#[test]
fn test_zero_width_is_malformed_header() {
    let err = parse_map(b"map:\nwidth: 0\nheight: 5\nlayers: 1\n").unwrap_err();
    assert!(matches!(
        err,
        TileMapError::MalformedHeader(HeaderError::InvalidValue {
            field: HeaderField::Width,
            value: 0
        })
    ));
}

#[test]
fn test_zero_layers_is_malformed_header() {
    let err = parse_map(b"map: width: 1 height: 1 layers: 0").unwrap_err();
    assert!(matches!(
        err,
        TileMapError::MalformedHeader(HeaderError::InvalidValue {
            field: HeaderField::Layers,
            ..
        })
    ));
}

#[test]
fn test_negative_height_is_missing_value() {
    let err = parse_map(b"map: width: 1 height: -1 layers: 1").unwrap_err();
    assert!(matches!(err, TileMapError::MalformedHeader(HeaderError::MissingValue(HeaderField::Height))));
}

#[test]
fn test_huge_width_is_malformed_header() {
    let err = parse_map(b"map: width: 99999999999 height: 1 layers: 1").unwrap_err();
    assert!(matches!(
        err,
        TileMapError::MalformedHeader(HeaderError::InvalidValue {
            field: HeaderField::Width,
            ..
        })
    ));
}

#[test]
fn test_garbled_keywords() {
    let cases: [(&[u8], HeaderField); 3] = [
        (b"map: widht: 1 height: 1 layers: 1", HeaderField::Width),
        (b"map: width: 1 heigth: 1 layers: 1", HeaderField::Height),
        (b"map: width: 1 height: 1 layer: 1", HeaderField::Layers),
    ];
    for (data, field) in cases {
        let err = parse_map(data).unwrap_err();
        assert!(
            matches!(err, TileMapError::MalformedHeader(HeaderError::MissingKeyword(f)) if f == field),
            "unexpected error {err}"
        );
    }
}

#[test]
fn test_missing_map_keyword() {
    let err = parse_map(b"width: 1 height: 1 layers: 1 0,").unwrap_err();
    assert!(matches!(err, TileMapError::MalformedHeader(HeaderError::MissingMapKeyword)));
}

// ============================================================================
// Cell errors
// ============================================================================

#[test]
fn test_missing_tile_reports_position() {
    let err = parse_map(b"map: width: 2 height: 2 layers: 2 1,2,3,4, 5,6,x,8,").unwrap_err();
    assert!(matches!(
        err,
        TileMapError::MalformedCell {
            x: 0,
            y: 1,
            layer: 1,
            kind: CellError::MissingTile
        }
    ));
}

#[test]
fn test_truncated_file_is_missing_tile() {
    let err = parse_map(b"map: width: 2 height: 1 layers: 1 1,").unwrap_err();
    assert!(matches!(
        err,
        TileMapError::MalformedCell {
            x: 1,
            y: 0,
            layer: 0,
            kind: CellError::MissingTile
        }
    ));
}

#[test]
fn test_tile_overflow() {
    let err = parse_map(b"map: width: 2 height: 1 layers: 1 1, 256,").unwrap_err();
    assert!(matches!(
        err,
        TileMapError::ValueOverflow {
            x: 1,
            y: 0,
            layer: 0,
            value: 256
        }
    ));
}

#[test]
fn test_missing_comma() {
    let err = parse_map(b"map: width: 2 height: 1 layers: 1 1 2,").unwrap_err();
    assert!(matches!(
        err,
        TileMapError::MalformedCell {
            x: 0,
            y: 0,
            layer: 0,
            kind: CellError::MissingSeparator
        }
    ));
}

#[test]
fn test_trailing_content() {
    let err = parse_map(b"map: width: 1 height: 1 layers: 1 1, 2, 3, 4, 5, 6,").unwrap_err();
    let TileMapError::TrailingContent { snippet } = err else {
        panic!("expected trailing content error, got {err}");
    };
    assert_eq!(snippet, "2, 3, 4, 5");
}

// ============================================================================
// Round trips
// ============================================================================

#[test]
fn test_write_then_parse_round_trip() {
    let grid = numbered_grid(7, 5, 3);
    let text = write_map(&grid);
    assert_eq!(parse_map(text.as_bytes()).unwrap(), grid);
}

#[test]
fn test_save_and_load_text_file() {
    let mut grid = numbered_grid(4, 4, 2);
    let temp_file = NamedTempFile::with_suffix(".map").unwrap();
    let path = temp_file.path();

    grid.save(path).unwrap();
    assert_eq!(grid.source_path(), Some(path));

    let loaded = TileGrid::load(path).unwrap();
    assert_eq!(loaded, grid);
    assert_eq!(loaded.source_path(), Some(path));
}

#[test]
fn test_uppercase_png_suffix_saves_text() {
    let mut grid = numbered_grid(2, 2, 5);
    let temp_file = NamedTempFile::with_suffix(".PNG").unwrap();
    assert_eq!(MapFormat::from_path(temp_file.path()), MapFormat::Text);

    grid.save(temp_file.path()).unwrap();
    let text = std::fs::read_to_string(temp_file.path()).unwrap();
    assert!(text.starts_with("map:"));
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = TileGrid::load(&dir.path().join("missing.map")).unwrap_err();
    assert!(matches!(err, TileMapError::IoUnavailable { .. }));
}

#[test]
fn test_detect() {
    assert_eq!(MapFormat::detect(b"  \n map:"), MapFormat::Text);
    assert_eq!(MapFormat::detect(b"\x89PNG"), MapFormat::Png);
    assert_eq!(MapFormat::detect(b""), MapFormat::Png);
}
