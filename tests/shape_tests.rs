//! Shape tests - catalog templates and quarter-turn rotation

use blockfall::core::{Shape, ShapeError};
use blockfall::types::ShapeKind;

// ============== Template Tests ==============

#[test]
fn test_catalog_templates() {
    let expected: [(ShapeKind, Vec<Vec<u8>>); 7] = [
        (ShapeKind::I, vec![vec![1, 1, 1, 1]]),
        (ShapeKind::O, vec![vec![1, 1], vec![1, 1]]),
        (ShapeKind::T, vec![vec![0, 1, 0], vec![1, 1, 1]]),
        (ShapeKind::S, vec![vec![1, 1, 0], vec![0, 1, 1]]),
        (ShapeKind::Z, vec![vec![0, 1, 1], vec![1, 1, 0]]),
        (ShapeKind::L, vec![vec![1, 1, 1], vec![1, 0, 0]]),
        (ShapeKind::J, vec![vec![1, 1, 1], vec![0, 0, 1]]),
    ];

    for (kind, matrix) in expected {
        assert_eq!(Shape::template(kind).to_matrix(), matrix, "{:?}", kind);
    }
}

#[test]
fn test_template_matches_from_matrix() {
    let z = Shape::from_matrix(&[[0u8, 1, 1], [1, 1, 0]]).unwrap();
    assert_eq!(z, Shape::template(ShapeKind::Z));
}

// ============== Rotation Tests ==============

#[test]
fn test_rotation_swaps_dimensions() {
    for kind in ShapeKind::ALL {
        let shape = Shape::template(kind);
        let rotated = shape.rotated();
        assert_eq!(rotated.rows(), shape.cols());
        assert_eq!(rotated.cols(), shape.rows());
        assert_eq!(rotated.filled_count(), shape.filled_count());
    }
}

#[test]
fn test_rotation_formula() {
    // new[i][j] = old[j][C-1-i]
    for kind in ShapeKind::ALL {
        let old = Shape::template(kind);
        let new = old.rotated();
        for i in 0..new.rows() {
            for j in 0..new.cols() {
                assert_eq!(new.get(i, j), old.get(j, old.cols() - 1 - i), "{:?}", kind);
            }
        }
    }
}

#[test]
fn test_s_rotation_sequence() {
    let s = Shape::template(ShapeKind::S);
    let r1 = s.rotated();
    assert_eq!(r1.to_matrix(), vec![vec![0, 1], vec![1, 1], vec![1, 0]]);

    let r2 = r1.rotated();
    assert_eq!(r2, s);
}

#[test]
fn test_o_rotation_is_fixed_point() {
    let o = Shape::template(ShapeKind::O);
    assert_eq!(o.rotated(), o);
}

#[test]
fn test_rotation_does_not_touch_template() {
    let before = Shape::template(ShapeKind::L);
    let _ = before.rotated();
    assert_eq!(Shape::template(ShapeKind::L), before);
}

// ============== Serialization ==============

#[test]
fn test_shape_serializes_as_matrix() {
    let json = serde_json::to_string(&Shape::template(ShapeKind::T)).unwrap();
    assert_eq!(json, "[[0,1,0],[1,1,1]]");

    let back: Shape = serde_json::from_str("[[1,1],[1,1]]").unwrap();
    assert_eq!(back, Shape::template(ShapeKind::O));
}

#[test]
fn test_shape_deserialize_rejects_ragged() {
    let err = serde_json::from_str::<Shape>("[[1,1],[1]]").unwrap_err();
    assert!(err.to_string().contains("row 1"), "{}", err);

    assert_eq!(
        Shape::from_matrix(&[[1u8; 5]]),
        Err(ShapeError::TooLarge { rows: 1, cols: 5 })
    );
}
