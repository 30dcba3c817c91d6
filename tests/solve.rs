use fifteen::{apply_moves, new_grid, solve, solver, Move, MoveSequence, Puzzle, PuzzleError};
use proptest::prelude::*;
use rand::{rngs::StdRng, SeedableRng};

fn scrambled(height: usize, width: usize, steps: usize, seed: u64) -> Puzzle {
    let mut puzzle = Puzzle::new(height, width);
    puzzle.shuffle(steps, &mut StdRng::seed_from_u64(seed));
    puzzle
}

fn assert_round_trip(grid: &Puzzle) -> MoveSequence {
    let moves = solve(grid).unwrap();
    let mut replay = grid.clone();
    apply_moves(&mut replay, &moves).unwrap();
    assert!(replay.is_solved(), "not solved after {moves}:\n{replay}");
    moves
}

#[test]
fn test_solved_2x2_needs_no_moves() {
    let grid = new_grid(2, 2, Some(vec![vec![0, 1], vec![2, 3]]));
    assert!(solve(&grid).unwrap().is_empty());
}

#[test]
fn test_solved_grid_of_any_size_needs_no_moves() {
    for (height, width) in [(2, 3), (3, 2), (4, 4), (5, 7)] {
        assert!(solve(&new_grid(height, width, None)).unwrap().is_empty());
    }
}

#[test]
fn test_2x2_single_swap() {
    let grid = new_grid(2, 2, Some(vec![vec![1, 0], vec![2, 3]]));
    let moves = assert_round_trip(&grid);
    insta::assert_snapshot!(moves.to_string(), @"dul");
}

#[test]
fn test_3x3_scramble() {
    let mut grid = new_grid(3, 3, Some(vec![vec![3, 1, 2], vec![6, 4, 5], vec![0, 7, 8]]));
    let moves = solve(&grid).unwrap();
    insta::assert_snapshot!(moves.to_string(), @"rrllurrlurlduldruldrul");

    apply_moves(&mut grid, &moves).unwrap();
    assert_eq!(
        grid,
        new_grid(3, 3, Some(vec![vec![0, 1, 2], vec![3, 4, 5], vec![6, 7, 8]]))
    );
}

#[test]
fn test_4x4_random_scrambles() {
    for seed in 0..25 {
        assert_round_trip(&scrambled(4, 4, 1000, seed));
    }
}

#[test]
fn test_narrow_and_flat_grids() {
    for (height, width) in [(2, 7), (7, 2), (2, 2), (3, 2), (6, 5)] {
        for seed in 0..10 {
            assert_round_trip(&scrambled(height, width, 500, seed));
        }
    }
}

#[test]
fn test_solution_carries_solved_grid() {
    let grid = scrambled(3, 5, 300, 42);
    let solution = solver::solve(&grid).unwrap();
    assert!(solution.solved.is_solved());

    let mut replay = grid.clone();
    replay.apply_moves(&solution.moves).unwrap();
    assert_eq!(replay, solution.solved);
}

#[test]
fn test_apply_moves_reports_out_of_bounds() {
    let mut grid = new_grid(3, 3, None);
    let moves: MoveSequence = "rrr".parse().unwrap();
    let err = apply_moves(&mut grid, &moves).unwrap_err();
    assert_eq!(
        err,
        PuzzleError::OutOfBounds {
            direction: Move::Right,
            row: 0,
            col: 2
        }
    );
}

#[test]
fn test_move_string_round_trips_through_text() {
    let grid = scrambled(4, 5, 400, 7);
    let moves = solve(&grid).unwrap();
    let parsed: MoveSequence = moves.to_string().parse().unwrap();
    assert_eq!(parsed, moves);
}

#[test]
fn test_concurrent_solves_of_different_grids() {
    let grids: Vec<Puzzle> = (0..4).map(|seed| scrambled(5, 5, 600, seed)).collect();

    let results: Vec<MoveSequence> = std::thread::scope(|scope| {
        let handles: Vec<_> = grids
            .iter()
            .map(|grid| scope.spawn(move || solve(grid).unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for (grid, moves) in grids.iter().zip(&results) {
        assert_eq!(moves, &solve(grid).unwrap(), "solving must be deterministic");
    }
}

proptest! {
    #[test]
    fn solve_round_trips_with_legal_moves(
        height in 2usize..7,
        width in 2usize..7,
        steps in 0usize..400,
        seed in any::<u64>(),
    ) {
        let grid = scrambled(height, width, steps, seed);
        let before = grid.clone();

        let moves = solve(&grid).unwrap();
        prop_assert_eq!(&grid, &before);

        let mut replay = grid.clone();
        for &movement in &moves {
            prop_assert!(replay.apply_move(movement).is_ok(), "illegal {} in {}", movement, moves);
        }
        prop_assert!(replay.is_solved());

        let cells = height * width;
        prop_assert!(moves.len() <= 20 * cells * cells, "{} moves for {} cells", moves.len(), cells);
    }

    #[test]
    fn scramble_then_inverse_restores_solved_grid(
        height in 2usize..6,
        width in 2usize..6,
        steps in 0usize..200,
        seed in any::<u64>(),
    ) {
        let mut grid = Puzzle::new(height, width);
        let walk = grid.shuffle(steps, &mut StdRng::seed_from_u64(seed));
        grid.apply_moves(walk.inverse()).unwrap();
        prop_assert!(grid.is_solved());
    }
}
