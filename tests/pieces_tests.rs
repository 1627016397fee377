//! Piece shape and rotation tests

use std::collections::HashSet;

use tetris3d::core::{standard_pieces, Grid, GridDims, Piece, PieceDef, Rotation3};
use tetris3d::types::{Axis, Coord, PieceColor};

fn dims() -> GridDims {
    GridDims::new(4, 4, 10).unwrap()
}

fn sorted(cells: impl Iterator<Item = Coord>) -> Vec<Coord> {
    let mut v: Vec<_> = cells.collect();
    v.sort();
    v
}

fn all_rotations() -> impl Iterator<Item = Rotation3> {
    (0..4u16).flat_map(|x| {
        (0..4u16).flat_map(move |y| {
            (0..4u16).map(move |z| Rotation3 {
                x: x * 90,
                y: y * 90,
                z: z * 90,
            })
        })
    })
}

#[test]
fn test_spawn_position_is_top_center() {
    for def in standard_pieces() {
        let piece = Piece::spawn(&def, dims());
        let w = def.mask.width() as i32;
        let h = def.mask.height() as i32;
        assert_eq!(piece.position, ((4 - w) / 2, 10 - h, 1), "{:?}", def.color);
        assert_eq!(piece.rotation, Rotation3::default());

        let top = piece.world_cells().map(|(_, y, _)| y).max().unwrap();
        assert_eq!(top, 9, "{:?} top row", def.color);
        assert!(piece.fits(&Grid::with_dims(dims())));
    }
}

#[test]
fn test_unrotated_cells_follow_mask() {
    let defs = standard_pieces();
    let blue = &defs[1];
    assert_eq!(blue.color, PieceColor::Blue);

    let piece = Piece {
        position: (0, 0, 2),
        ..Piece::spawn(blue, dims())
    };
    // Rows bottom first: 111 then 100.
    assert_eq!(
        sorted(piece.world_cells()),
        vec![(0, 0, 2), (0, 1, 2), (1, 0, 2), (2, 0, 2)]
    );
    assert_eq!(piece.active_shape_mask(), &blue.mask);
}

#[test]
fn test_world_cells_distinct_for_every_rotation() {
    for def in standard_pieces() {
        let spawned = Piece::spawn(&def, dims());
        for rotation in all_rotations() {
            let piece = Piece {
                rotation,
                ..spawned.clone()
            };
            let cells: HashSet<Coord> = piece.world_cells().collect();
            assert_eq!(
                cells.len(),
                def.mask.cell_count(),
                "{:?} at {rotation:?}",
                def.color
            );
        }
    }
}

#[test]
fn test_rotation_then_inverse_restores_cells() {
    for def in standard_pieces() {
        let spawned = Piece::spawn(&def, dims());
        for rotation in all_rotations() {
            let piece = Piece {
                rotation,
                ..spawned.clone()
            };
            for axis in Axis::ALL {
                let back = piece
                    .rotated(axis, 90)
                    .and_then(|p| p.rotated(axis, -90))
                    .unwrap();
                assert_eq!(
                    sorted(back.world_cells()),
                    sorted(piece.world_cells()),
                    "{:?} {rotation:?} about {axis:?}",
                    def.color
                );
            }
        }
    }
}

#[test]
fn test_four_quarter_turns_are_identity() {
    let spawned = Piece::spawn(&standard_pieces()[4], dims());
    for axis in Axis::ALL {
        let mut piece = spawned.clone();
        for _ in 0..4 {
            piece = piece.rotated(axis, 90).unwrap();
        }
        assert_eq!(piece, spawned);
    }
}

#[test]
fn test_rotation_keeps_cell_count_and_connectivity() {
    let spawned = Piece::spawn(&standard_pieces()[5], dims());
    let turned = spawned.rotated(Axis::Y, 90).unwrap();
    let cells: Vec<Coord> = turned.world_cells().collect();
    assert_eq!(cells.len(), 4);

    // Every cell has a face neighbour in the piece.
    for &(x, y, z) in &cells {
        let touching = cells
            .iter()
            .filter(|&&(a, b, c)| (a - x).abs() + (b - y).abs() + (c - z).abs() == 1)
            .count();
        assert!(touching >= 1, "({x}, {y}, {z}) is detached");
    }
}

#[test]
fn test_y_turn_moves_piece_into_depth() {
    let def = PieceDef::new(PieceColor::Green, &[[1u8, 1, 1]]).unwrap();
    let piece = Piece {
        position: (0, 0, 1),
        ..Piece::spawn(&def, dims())
    };
    let turned = piece.rotated(Axis::Y, 90).unwrap();
    // A 1x3 bar along x becomes a bar along z through the same center cell.
    assert_eq!(sorted(turned.world_cells()), vec![(1, 0, 0), (1, 0, 1), (1, 0, 2)]);
}

#[test]
fn test_non_quarter_rotation_rejected() {
    let piece = Piece::spawn(&standard_pieces()[0], dims());
    assert!(piece.rotated(Axis::X, 45).is_none());
    assert!(Rotation3::default().rotate(Axis::Z, 100).is_none());
    assert_eq!(
        Rotation3::default().rotate(Axis::Z, -90),
        Some(Rotation3 { x: 0, y: 0, z: 270 })
    );
    assert_eq!(
        Rotation3::default().rotate(Axis::Y, 450),
        Some(Rotation3 { x: 0, y: 90, z: 0 })
    );
}

#[test]
fn test_translated_moves_every_cell() {
    let piece = Piece::spawn(&standard_pieces()[3], dims());
    let moved = piece.translated(1, -2, 1);
    let expected: Vec<Coord> = sorted(piece.world_cells().map(|(x, y, z)| (x + 1, y - 2, z + 1)));
    assert_eq!(sorted(moved.world_cells()), expected);
}
