//! Integration tests for stripgrid-mesh.

use stripgrid_mesh::{build, recomputed_strip, GridDimensions, GridMesh, MeshError};

const SIZES: &[(u32, u32)] = &[(1, 1), (1, 5), (2, 1), (3, 4), (4, 4), (7, 2), (16, 9)];

fn mesh(rows: u32, cols: u32) -> GridMesh {
    build(rows, cols).unwrap()
}

#[test]
fn buffer_lengths_match_formulas() {
    for &(rows, cols) in SIZES {
        let m = mesh(rows, cols);
        let (r, c) = (rows as usize, cols as usize);
        assert_eq!(m.vertex_count(), (r + 1) * (c + 1), "{rows}x{cols}");
        assert_eq!(m.index_count(), 2 * c * (r + 1), "{rows}x{cols}");
    }
}

#[test]
fn positions_follow_address_formula() {
    for &(rows, cols) in SIZES {
        let m = mesh(rows, cols);
        let dx = 2.0 / cols as f32;
        let dy = 2.0 / rows as f32;
        for i in 0..=cols {
            for j in 0..=rows {
                let v = m.vertices()[(i * (rows + 1) + j) as usize];
                assert!((v.position[0] - (-1.0 + i as f32 * dx)).abs() < 1e-5);
                assert!((v.position[1] - (-1.0 + j as f32 * dy)).abs() < 1e-5);
                assert_eq!(v.position[2], 0.0);
            }
        }
    }
}

#[test]
fn grid_spans_unit_square() {
    let m = mesh(3, 7);
    let last = m.vertex_at(7, 3).unwrap().position;
    assert!((last[0] - 1.0).abs() < 1e-5);
    assert!((last[1] - 1.0).abs() < 1e-5);
    assert_eq!(m.vertex_at(0, 0).unwrap().position, [-1.0, -1.0, 0.0]);
    assert!(m.vertex_at(8, 0).is_none());
    assert!(m.vertex_at(0, 4).is_none());
}

#[test]
fn indices_in_bounds() {
    for &(rows, cols) in SIZES {
        let m = mesh(rows, cols);
        let n = m.vertex_count() as u32;
        assert!(m.indices().iter().all(|&i| i < n), "{rows}x{cols}");
    }
}

#[test]
fn column_runs_zig_zag() {
    for &(rows, cols) in SIZES {
        let m = mesh(rows, cols);
        let chunk = 2 * (rows + 1) as usize;
        for i in 0..cols {
            let run = &m.indices()[i as usize * chunk..(i as usize + 1) * chunk];
            assert_eq!(run, m.column_strip(i));
            for j in 0..=rows {
                assert_eq!(run[2 * j as usize], i * (rows + 1) + j);
                assert_eq!(run[2 * j as usize + 1], (i + 1) * (rows + 1) + j);
            }
        }
    }
}

#[test]
fn strip_ranges_tile_index_buffer() {
    let m = mesh(4, 3);
    assert_eq!(m.strip_range(0), 0..10);
    assert_eq!(m.strip_range(1), 10..20);
    assert_eq!(m.strip_range(2), 20..30);
    assert_eq!(m.strip_range(2).end as usize, m.index_count());
}

#[test]
#[should_panic]
fn strip_range_past_last_column_panics() {
    let m = mesh(2, 2);
    let _ = m.strip_range(2);
}

#[test]
fn strip_walkers_agree() {
    for &(rows, cols) in SIZES {
        let m = mesh(rows, cols);
        for col in 0..cols {
            let a: Vec<_> = recomputed_strip(m.dims(), col).collect();
            let b: Vec<_> = m.addressed_strip(col).collect();
            let c: Vec<_> = m.indexed_strip(col).collect();
            assert_eq!(a.len(), m.strip_len());
            assert_eq!(a, b, "{rows}x{cols} col {col}");
            assert_eq!(b, c, "{rows}x{cols} col {col}");
        }
    }
}

#[test]
fn builds_are_deterministic() {
    let a = mesh(5, 3);
    let b = mesh(5, 3);
    let bits = |m: &GridMesh| -> Vec<[u32; 3]> {
        m.vertices()
            .iter()
            .map(|v| v.position.map(f32::to_bits))
            .collect()
    };
    assert_eq!(bits(&a), bits(&b));
    assert_eq!(a.indices(), b.indices());
}

#[test]
fn zero_dimensions_rejected() {
    assert_eq!(
        build(0, 1).unwrap_err(),
        MeshError::InvalidDimensions { rows: 0, cols: 1 }
    );
    assert!(matches!(build(1, 0), Err(MeshError::InvalidDimensions { .. })));
    assert!(GridDimensions::new(0, 0).is_err());
}

#[test]
fn error_message_names_dimensions() {
    let msg = build(0, 3).unwrap_err().to_string();
    assert!(msg.contains("0x3"), "{msg}");
}

#[test]
fn into_parts_hands_over_buffers() {
    let (vertices, indices) = mesh(1, 2).into_parts();
    assert_eq!(vertices.len(), 6);
    assert_eq!(indices, vec![0, 2, 1, 3, 2, 4, 3, 5]);
}
