//! Behavioral contract of the excerpt run selection
//!
//! Each test pins one observable rule of `select_densest_run`: which
//! anchor wins, what counts as inside the window, and how the selection
//! behaves under re-runs, input reordering, and wider windows.

use lectern::excerpt::{select_densest_run, MatchRange, RunSelection};

fn ranges(pairs: &[(usize, usize)]) -> Vec<MatchRange> {
    pairs.iter().map(|&(o, l)| MatchRange::new(o, l)).collect()
}

#[test]
fn single_match_selects_itself() {
    let input = ranges(&[(10, 5)]);
    let result = select_densest_run(&input, 200).unwrap();
    assert_eq!(result, RunSelection { start_index: 0, run_length: 1 });
}

#[test]
fn all_matches_inside_one_window() {
    let input = ranges(&[(0, 3), (5, 3), (9, 3)]);
    let result = select_densest_run(&input, 200).unwrap();
    assert_eq!(result, RunSelection { start_index: 0, run_length: 3 });
}

#[test]
fn match_ending_exactly_at_the_window_boundary_is_excluded() {
    // The second match ends at 200, which is not strictly before 0 + 200.
    let input = ranges(&[(0, 3), (197, 3)]);
    let result = select_densest_run(&input, 200).unwrap();
    assert_eq!(result, RunSelection { start_index: 0, run_length: 1 });

    // One character earlier and it fits.
    let input = ranges(&[(0, 3), (196, 3)]);
    let result = select_densest_run(&input, 200).unwrap();
    assert_eq!(result, RunSelection { start_index: 0, run_length: 2 });
}

#[test]
fn sparse_matches_keep_the_leftmost_anchor() {
    // Every window fits only its own anchor; ties resolve to the left.
    let input = ranges(&[(0, 2), (1000, 2), (2000, 2)]);
    let result = select_densest_run(&input, 200).unwrap();
    assert_eq!(result, RunSelection { start_index: 0, run_length: 1 });
}

#[test]
fn dense_cluster_beats_a_lone_distant_match() {
    let input = ranges(&[(0, 2), (10, 2), (20, 2), (1000, 2)]);
    let result = select_densest_run(&input, 50).unwrap();
    assert_eq!(result, RunSelection { start_index: 0, run_length: 3 });
}

#[test]
fn selection_is_deterministic_across_runs() {
    let input = ranges(&[(0, 2), (10, 2), (500, 2), (510, 2), (520, 2)]);
    let first = select_densest_run(&input, 100).unwrap();
    let second = select_densest_run(&input, 100).unwrap();
    assert_eq!(first, second);
}

#[test]
fn input_order_does_not_change_the_selection() {
    let baseline = ranges(&[(0, 2), (10, 2), (20, 2), (1000, 2)]);
    let expected = select_densest_run(&baseline, 50).unwrap();

    let permutations: [&[(usize, usize)]; 5] = [
        &[(1000, 2), (20, 2), (10, 2), (0, 2)],
        &[(10, 2), (0, 2), (1000, 2), (20, 2)],
        &[(20, 2), (1000, 2), (0, 2), (10, 2)],
        &[(0, 2), (1000, 2), (10, 2), (20, 2)],
        &[(1000, 2), (0, 2), (20, 2), (10, 2)],
    ];
    for permutation in permutations {
        let result = select_densest_run(&ranges(permutation), 50).unwrap();
        assert_eq!(result, expected, "diverged for input order {permutation:?}");
    }
}

#[test]
fn widening_the_window_never_shrinks_the_best_run() {
    let input = ranges(&[(0, 2), (30, 2), (80, 4), (120, 2), (800, 2), (815, 2)]);

    let mut previous_best = 0;
    for width in [1, 5, 10, 40, 90, 130, 200, 500, 1000] {
        let result = select_densest_run(&input, width).unwrap();
        assert!(
            result.run_length >= previous_best,
            "width {width} captured {} matches, narrower window captured {previous_best}",
            result.run_length
        );
        previous_best = result.run_length;
    }
}
