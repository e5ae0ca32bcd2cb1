//! Accuracy regression tests for gesture-dtw.
//!
//! These tests pin the alignment cost on small hand-traced gestures and check
//! the metric and alignment properties the lock decision relies on.

use gesture_dtw::{
    CostMatrix, Dtw, DtwError, GestureConfig, GestureLock, MAX_ALIGNMENT_LEN, PNorm, Sequence,
    Tolerance, Verdict, matches, minkowski, standard_scale,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn seq(rows: &[[f64; 3]]) -> Sequence {
    Sequence::from_rows(rows, 100).expect("valid test sequence")
}

fn figure_eight(n: usize, speed: f64) -> Sequence {
    let rows: Vec<[f64; 3]> = (0..n)
        .map(|i| {
            let t = i as f64 / n as f64 * std::f64::consts::TAU * speed;
            [t.sin(), (t * 2.0).sin() * 0.5, t.cos() * 0.2]
        })
        .collect();
    Sequence::from_rows(&rows, 100).expect("valid test sequence")
}

// ---------------------------------------------------------------------------
// a) hand-traced scenarios
// ---------------------------------------------------------------------------

/// Identical key and candidate align at zero cost and match under any positive tolerance.
#[test]
fn identical_gesture_scores_zero() {
    let rows = [[0.0, 2.0, 0.0], [1.0, 2.0, 0.0], [2.0, 2.0, 0.0]];
    let mut key = seq(&rows);
    let mut candidate = seq(&rows);
    standard_scale(&mut key);
    standard_scale(&mut candidate);

    let score = Dtw::euclidean().distance(&key, &candidate).unwrap();
    assert_eq!(score.value(), 0.0);
    for tol in [1e-9, 1.0, 80.0] {
        assert!(matches(score, Tolerance::new(tol).unwrap()));
    }
}

/// First-axis-only motion, unnormalized, p = 2.
///
/// ```text
/// local cost           cumulative D
///       c0 c1 c3             c0 c1 c3
/// k0     0  1  3       k0     0  1  4
/// k1     1  0  2       k1     1  0  2
/// k2     2  1  1       k2     3  1  1
/// ```
#[test]
fn one_axis_motion_matches_manual_trace() {
    let key = seq(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]]);
    let candidate = seq(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [3.0, 0.0, 0.0]]);
    let dtw = Dtw::new(PNorm::new(2.0).unwrap());

    assert_eq!(dtw.distance(&key, &candidate).unwrap().value(), 1.0);

    let mut matrix = CostMatrix::new(100).unwrap();
    assert_eq!(
        dtw.distance_in(&key, &candidate, &mut matrix).unwrap().value(),
        1.0
    );
}

/// Length-one sequences reduce DTW to a single metric evaluation.
#[test]
fn single_sample_equals_metric() {
    let a = [0.25, -1.5, 3.0];
    let b = [1.0, 0.5, -2.0];
    for p in [0.5, 1.0, 2.0, 3.0] {
        let p = PNorm::new(p).unwrap();
        let dtw = Dtw::new(p).distance(&seq(&[a]), &seq(&[b])).unwrap();
        let direct = minkowski(&a, &b, p).unwrap();
        assert_eq!(dtw.value(), direct, "p = {p}");
    }
}

// ---------------------------------------------------------------------------
// b) properties
// ---------------------------------------------------------------------------

#[test]
fn metric_zero_on_self_and_symmetric() {
    let samples = [
        [0.0, 0.0, 0.0],
        [1.0, -2.0, 0.5],
        [3.3, 7.1, -4.2],
        [-0.001, 0.002, 1e6],
    ];
    for p in [0.5, 1.0, 1.5, 2.0, 4.0] {
        let p = PNorm::new(p).unwrap();
        for a in &samples {
            assert_eq!(minkowski(a, a, p).unwrap(), 0.0);
            for b in &samples {
                assert_eq!(minkowski(a, b, p).unwrap(), minkowski(b, a, p).unwrap());
            }
        }
    }
}

#[test]
fn dtw_symmetric_under_swap() {
    let pairs = [
        (figure_eight(40, 1.0), figure_eight(55, 1.0)),
        (figure_eight(30, 1.0), figure_eight(30, 1.3)),
        (figure_eight(10, 2.0), figure_eight(70, 0.5)),
    ];
    for p in [1.0, 2.0, 3.0] {
        let dtw = Dtw::new(PNorm::new(p).unwrap());
        for (i, (a, b)) in pairs.iter().enumerate() {
            let ab = dtw.distance(a, b).unwrap().value();
            let ba = dtw.distance(b, a).unwrap().value();
            assert!((ab - ba).abs() < 1e-9, "pair {i}, p = {p}: {ab} != {ba}");
        }
    }
}

#[test]
fn dtw_zero_on_identically_normalized_copies() {
    let mut a = figure_eight(64, 1.0);
    let mut b = a.clone();
    standard_scale(&mut a);
    standard_scale(&mut b);
    assert_eq!(Dtw::euclidean().distance(&a, &b).unwrap().value(), 0.0);
}

#[test]
fn dimension_mismatch_never_yields_a_score() {
    let key = seq(&[[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]]);
    let candidate = Sequence::from_rows(&[[0.0, 0.0], [1.0, 1.0]], 100).unwrap();
    let dtw = Dtw::euclidean();

    assert!(matches!(
        dtw.distance(&key, &candidate),
        Err(DtwError::DimensionMismatch { key: 3, candidate: 2 })
    ));
    let mut matrix = CostMatrix::new(100).unwrap();
    assert!(matches!(
        dtw.distance_and_path(&key, &candidate, &mut matrix),
        Err(DtwError::DimensionMismatch { .. })
    ));
}

#[test]
fn single_normalization_gives_zero_mean_unit_std() {
    let mut s = figure_eight(100, 1.0);
    standard_scale(&mut s);
    let n = s.len() as f64;
    for d in 0..s.dim() {
        let mean = s.samples().map(|x| x[d]).sum::<f64>() / n;
        let std = (s.samples().map(|x| (x[d] - mean).powi(2)).sum::<f64>() / n).sqrt();
        assert!(mean.abs() < 1e-9, "dim {d}: mean {mean}");
        assert!((std - 1.0).abs() < 1e-9, "dim {d}: std {std}");
    }
}

// ---------------------------------------------------------------------------
// c) rolling, buffered, and path variants agree
// ---------------------------------------------------------------------------

#[test]
fn all_entry_points_agree() {
    let dtw = Dtw::euclidean();
    let mut matrix = CostMatrix::new(100).unwrap();
    let pairs = [
        (figure_eight(100, 1.0), figure_eight(100, 1.1)),
        (figure_eight(20, 1.0), figure_eight(90, 1.0)),
        (figure_eight(75, 0.8), figure_eight(12, 1.0)),
    ];
    for (i, (a, b)) in pairs.iter().enumerate() {
        let rolling = dtw.distance(a, b).unwrap().value();
        let buffered = dtw.distance_in(a, b, &mut matrix).unwrap().value();
        let (with_path, path) = dtw.distance_and_path(a, b, &mut matrix).unwrap();
        assert!((rolling - buffered).abs() < 1e-9, "pair {i}");
        assert!((buffered - with_path.value()).abs() < 1e-12, "pair {i}");
        assert!(path.len() >= a.len().max(b.len()), "pair {i}");
    }
}

// ---------------------------------------------------------------------------
// d) session end to end
// ---------------------------------------------------------------------------

#[test]
fn faster_repetition_of_key_is_accepted() {
    let mut lock = GestureLock::new(GestureConfig::new());
    lock.enroll(figure_eight(100, 1.0)).unwrap();

    // Same shape drawn in 70 samples instead of 100.
    let attempt = lock.verify(figure_eight(70, 1.0)).unwrap();
    assert_eq!(attempt.verdict, Verdict::Match);
    assert!(attempt.score.unwrap().value() < 80.0);
}

#[test]
fn unrelated_motion_scores_higher_than_repetition() {
    let mut lock = GestureLock::new(GestureConfig::new());
    lock.enroll(figure_eight(100, 1.0)).unwrap();

    let repeat = lock.verify(figure_eight(90, 1.0)).unwrap();
    let rows: Vec<[f64; 3]> = (0..100)
        .map(|i| {
            let t = i as f64;
            [(t * 0.9).cos(), -(t * 0.05), (t * 1.7).sin()]
        })
        .collect();
    let other = lock
        .verify(Sequence::from_rows(&rows, 100).unwrap())
        .unwrap();

    assert!(repeat.score.unwrap() < other.score.unwrap());
}

#[test]
fn repeated_gesture_keeps_key_tempo() {
    let mut lock = GestureLock::new(GestureConfig::new());
    lock.enroll(figure_eight(50, 1.0)).unwrap();

    let attempt = lock.verify(figure_eight(100, 1.0)).unwrap();
    let path = attempt.path.unwrap();
    assert_eq!(path.tempo(), 2.0);
    assert!(path.max_drift() < 3.0, "drift {}", path.max_drift());
}

// ---------------------------------------------------------------------------
// e) robustness at the numeric and allocation limits
// ---------------------------------------------------------------------------

#[test]
fn normalization_output_is_always_finite() {
    let extremes = [
        vec![[1e308, 0.0, 1.0], [1e308, 1.0, 2.0], [1e308, 2.0, 0.0]],
        vec![[f64::MAX, -f64::MAX, 0.0], [-f64::MAX, f64::MAX, 1e-300]],
        vec![[f64::MAX, f64::MAX, f64::MAX]],
        vec![[1e300, -1e-300, 5.0], [-1e300, 1e-300, 5.0], [1e299, 0.0, 5.0]],
    ];
    for (i, rows) in extremes.iter().enumerate() {
        let mut s = seq(rows);
        let stats = standard_scale(&mut s);
        assert!(
            s.as_flat().iter().all(|v| v.is_finite()),
            "case {i}: {:?}",
            s.as_flat()
        );
        assert!(stats.means.iter().all(|v| v.is_finite()), "case {i}");
        assert!(stats.stds.iter().all(|v| v.is_finite()), "case {i}");
    }
}

#[test]
fn extreme_capture_verifies_without_panicking() {
    let rows = [[1e308, 0.0, 1.0], [1e308, 1.0, 2.0], [1e308, 2.0, 0.0]];
    let mut lock = GestureLock::new(GestureConfig::new());
    lock.enroll(seq(&rows)).unwrap();

    let same = lock.verify(seq(&rows)).unwrap();
    assert_eq!(same.verdict, Verdict::Match);
    assert_eq!(same.score.unwrap().value(), 0.0);

    let opposite: Vec<[f64; 3]> = rows.iter().map(|r| [-r[0], r[1], r[2]]).collect();
    let attempt = lock.verify(seq(&opposite)).unwrap();
    assert!(attempt.score.unwrap().value().is_finite());
}

#[test]
fn oversized_capacities_are_rejected() {
    assert!(matches!(
        Sequence::with_capacity(3, usize::MAX),
        Err(DtwError::CapacityOverflow { dim: 3, .. })
    ));
    assert!(matches!(
        CostMatrix::new(usize::MAX / 2),
        Err(DtwError::InvalidCapacity { .. })
    ));
    assert!(matches!(
        GestureConfig::new().with_max_len(MAX_ALIGNMENT_LEN + 1),
        Err(DtwError::InvalidCapacity { limit: MAX_ALIGNMENT_LEN, .. })
    ));
    assert!(matches!(
        GestureConfig::new().with_max_len(0),
        Err(DtwError::InvalidCapacity { capacity: 0, .. })
    ));

    let config = GestureConfig::new().with_max_len(MAX_ALIGNMENT_LEN).unwrap();
    assert_eq!(config.max_len(), MAX_ALIGNMENT_LEN);
}

