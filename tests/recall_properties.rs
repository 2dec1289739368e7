//! Integration tests for training and asynchronous recall.
//!
//! Random training sets come from a seeded `StdRng` so every run sees the same
//! inputs. Orthogonal Walsh patterns are used where recall must be exact.

use hopfield_core::{
    evolve_neuron, generate_weight_matrix, GridShape, HopfieldError, HopfieldNetwork, Pattern,
    RecallConfig, Spin,
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

// ─── helpers ─────────────────────────────────────────────────────────────────

fn random_state(rng: &mut StdRng, n: usize) -> Vec<Spin> {
    (0..n).map(|_| if rng.gen_bool(0.5) { 1 } else { -1 }).collect()
}

fn random_patterns(rng: &mut StdRng, n: usize, m: usize) -> Vec<Pattern> {
    (0..m)
        .map(|_| Pattern::new(random_state(rng, n)).unwrap())
        .collect()
}

/// Walsh function `k` over 16 neurons: mutually orthogonal for distinct `k`.
fn walsh(k: usize) -> Vec<Spin> {
    (0..16usize)
        .map(|i| if (i & k).count_ones() % 2 == 0 { 1 } else { -1 })
        .collect()
}

fn walsh_network() -> HopfieldNetwork {
    let mut net = HopfieldNetwork::for_grid(GridShape::new(4, 4));
    for k in [1, 2, 4] {
        net.train(&walsh(k)).unwrap();
    }
    net
}

// ─── reference scenarios ─────────────────────────────────────────────────────

/// One stored pattern, one corrupted neuron: index 1 is pulled back to -1.
#[test]
fn test_single_pattern_corrects_index_one() {
    let mut net = HopfieldNetwork::new();
    net.train(&[1, -1, 1, -1]).unwrap();

    let out = net.predict(&[1, 1, 1, -1], Some(&[0, 1, 2, 3])).unwrap();
    assert_eq!(out.final_state, [1, -1, 1, -1]);
    assert_eq!(out.initial_state, [1, 1, 1, -1]);
}

/// Predicting before any training fails and never reaches matrix construction.
#[test]
fn test_predict_with_no_patterns_is_invalid_training_set() {
    let net = HopfieldNetwork::new();
    assert_eq!(
        net.predict(&[1, 1, 1, -1], None),
        Err(HopfieldError::InvalidTrainingSet)
    );
    assert_eq!(net.weights(), Err(HopfieldError::InvalidTrainingSet));
}

// ─── weight matrix properties ────────────────────────────────────────────────

#[test]
fn test_weights_symmetric_with_zero_diagonal_for_random_sets() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for m in 1..=6 {
        let patterns = random_patterns(&mut rng, 20, m);
        let w = generate_weight_matrix(&patterns).unwrap();
        for i in 0..20 {
            assert_eq!(w.get(i, i), 0.0, "m={m}: diagonal {i}");
            for j in 0..20 {
                assert_eq!(w.get(i, j), w.get(j, i), "m={m}: W[{i}][{j}]");
            }
        }
    }
}

// ─── recall properties ───────────────────────────────────────────────────────

/// A stored orthogonal pattern is a fixed point: exactly N evaluations, no flips.
#[test]
fn test_auto_associative_recall_takes_one_sweep() {
    let net = walsh_network();
    for k in [1, 2, 4] {
        let out = net.predict(&walsh(k), None).unwrap();
        assert_eq!(out.final_state, walsh(k));
        assert_eq!(out.evaluations(), 16, "k={k}");
        assert_eq!(out.flips, 0);
    }
}

#[test]
fn test_noisy_cue_recovers_stored_pattern() {
    let net = walsh_network();
    let stored = Pattern::new(walsh(2)).unwrap();
    let cue = stored.with_flipped(&[0, 9]).unwrap();

    let out = net.predict(cue.as_slice(), None).unwrap();
    assert_eq!(out.final_state, stored.as_slice());
    let m = net.closest_pattern(&out.final_state).unwrap();
    assert_eq!((m.index, m.distance), (1, 0));
    assert_eq!(net.exact_matches(&out.final_state), [1]);
    assert!(net.exact_matches(cue.as_slice()).is_empty());
}

#[test]
fn test_energy_never_increases_along_history() {
    let mut rng = StdRng::seed_from_u64(42);
    for trial in 0..20 {
        let patterns = random_patterns(&mut rng, 25, 1 + trial % 5);
        let w = generate_weight_matrix(&patterns).unwrap();
        let initial = random_state(&mut rng, 25);
        let out = hopfield_core::simulator::run(&w, &initial, None, &RecallConfig { max_sweeps: 1_000 })
            .unwrap();

        let mut prev = w.energy(&out.initial_state);
        for (step, state) in out.history.iter().enumerate() {
            let e = w.energy(state);
            assert!(
                e <= prev + 1e-9,
                "trial {trial}: energy rose at step {step}: {prev} -> {e}"
            );
            prev = e;
        }
    }
}

#[test]
fn test_final_state_is_a_fixed_point_for_any_order() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..20 {
        let patterns = random_patterns(&mut rng, 16, 3);
        let w = generate_weight_matrix(&patterns).unwrap();
        let mut order: Vec<usize> = (0..16).collect();
        order.shuffle(&mut rng);
        let initial = random_state(&mut rng, 16);

        let out =
            hopfield_core::simulator::run(&w, &initial, Some(&order), &RecallConfig { max_sweeps: 1_000 })
                .unwrap();
        for i in 0..16 {
            assert_eq!(evolve_neuron(&w, &out.final_state, i), out.final_state[i]);
        }
        assert!(out.evaluations() >= 16);
        assert_eq!(out.history.last(), Some(out.final_state.as_slice()));
    }
}

#[test]
fn test_recall_is_deterministic() {
    let mut rng = StdRng::seed_from_u64(99);
    let mut net = HopfieldNetwork::new();
    for p in random_patterns(&mut rng, 30, 4) {
        net.train(p.as_slice()).unwrap();
    }
    let initial = random_state(&mut rng, 30);
    let mut order: Vec<usize> = (0..30).collect();
    order.shuffle(&mut rng);

    let a = net.predict(&initial, Some(&order)).unwrap();
    let b = net.predict(&initial, Some(&order)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_wrong_length_order_matches_default_order() {
    let net = walsh_network();
    let cue = Pattern::new(walsh(4)).unwrap().with_flipped(&[3]).unwrap();
    let default = net.predict(cue.as_slice(), None).unwrap();
    let short = net.predict(cue.as_slice(), Some(&[5, 4, 3])).unwrap();
    assert_eq!(default, short);
}

#[test]
fn test_one_based_order_from_collaborator() {
    let mut net = HopfieldNetwork::new();
    net.train(&[1, -1, 1, -1]).unwrap();
    let order = hopfield_core::TraversalOrder::from_one_based(&[4, 3, 2, 1], 4).unwrap();
    let out = net.predict(&[1, 1, 1, -1], Some(order.as_slice())).unwrap();
    assert_eq!(out.final_state, [1, -1, 1, -1]);
    assert_eq!(out.evaluations(), 7);
}

#[test]
fn test_predict_validates_initial_state_and_order() {
    let mut net = HopfieldNetwork::new();
    net.train(&[1, -1, 1, -1]).unwrap();

    assert!(matches!(
        net.predict(&[1, -1, 1], None),
        Err(HopfieldError::DimensionMismatch { what: "initial state", .. })
    ));
    assert!(matches!(
        net.predict(&[1, -1, 1, 0], None),
        Err(HopfieldError::InvalidSpin { index: 3, value: 0 })
    ));
    assert!(matches!(
        net.predict(&[1, -1, 1, -1], Some(&[0, 1, 2, 7])),
        Err(HopfieldError::InvalidNeuronIndex { index: 7, .. })
    ));
}

#[test]
fn test_grid_round_trip_through_recall() {
    let grid = GridShape::new(3, 3);
    let plus = grid
        .flatten(&[
            vec![false, true, false],
            vec![true, true, true],
            vec![false, true, false],
        ])
        .unwrap();

    let mut net = HopfieldNetwork::for_grid(grid);
    net.train(plus.as_slice()).unwrap();

    // Blank the centre cell.
    let cue = plus.with_flipped(&[4]).unwrap();
    let out = net.predict(cue.as_slice(), None).unwrap();
    assert_eq!(
        grid.to_rows(&out.final_state).unwrap(),
        vec![vec![-1, 1, -1], vec![1, 1, 1], vec![-1, 1, -1]]
    );
}
