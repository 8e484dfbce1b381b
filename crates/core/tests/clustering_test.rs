//! Tests for figure clustering.

use figlink_core::geometry::{Rect, center_distance, overlap_ratio};
use figlink_core::layout::{ClusterParams, DetectedPrimitive, ElementCategory, merge_primitives};

fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Rect {
    Rect::new(x0, y0, x1, y1).unwrap()
}

fn figure(x0: f64, y0: f64, x1: f64, y1: f64) -> DetectedPrimitive {
    DetectedPrimitive::new(rect(x0, y0, x1, y1), ElementCategory::Figure, 0.9)
}

/// Clustering with merging by distance only (overlap ratio never exceeds 1).
fn by_distance(distance: f64) -> ClusterParams {
    ClusterParams::new(distance, 1.1).unwrap()
}

#[test]
fn test_empty_input() {
    let clusters = merge_primitives(&[], &ClusterParams::default());
    assert!(clusters.is_empty());
}

#[test]
fn test_singleton() {
    let p = figure(10.0, 20.0, 30.0, 40.0);
    let clusters = merge_primitives(std::slice::from_ref(&p), &ClusterParams::default());
    assert_eq!(clusters.len(), 1);
    assert_eq!(clusters[0].rect, p.rect);
    assert_eq!(clusters[0].members, vec![p]);
    assert_eq!(clusters[0].confidence, 0.9);
}

#[test]
fn test_merge_by_distance() {
    let params = ClusterParams::new(100.0, 0.3).unwrap();
    let clusters = merge_primitives(
        &[figure(10.0, 10.0, 50.0, 50.0), figure(60.0, 10.0, 100.0, 50.0)],
        &params,
    );
    assert_eq!(clusters.len(), 1);
    assert_eq!(clusters[0].rect.as_tuple(), (10.0, 10.0, 100.0, 50.0));
    assert_eq!(clusters[0].members.len(), 2);
}

#[test]
fn test_merge_by_overlap() {
    let params = ClusterParams::new(50.0, 0.2).unwrap();
    let clusters = merge_primitives(
        &[figure(10.0, 10.0, 100.0, 100.0), figure(50.0, 50.0, 150.0, 150.0)],
        &params,
    );
    assert_eq!(clusters.len(), 1);
    assert_eq!(clusters[0].rect.as_tuple(), (10.0, 10.0, 150.0, 150.0));
}

#[test]
fn test_far_apart_stay_separate() {
    let params = ClusterParams::new(50.0, 0.3).unwrap();
    let a = figure(10.0, 10.0, 50.0, 50.0);
    let b = figure(200.0, 200.0, 250.0, 250.0);
    let clusters = merge_primitives(&[a.clone(), b.clone()], &params);
    assert_eq!(clusters.len(), 2);
    assert_eq!(clusters[0].members, vec![a]);
    assert_eq!(clusters[1].members, vec![b]);
}

#[test]
fn test_distance_threshold_inclusive() {
    // Centers exactly 50 apart.
    let clusters = merge_primitives(
        &[figure(0.0, 0.0, 10.0, 10.0), figure(50.0, 0.0, 60.0, 10.0)],
        &by_distance(50.0),
    );
    assert_eq!(clusters.len(), 1);
}

#[test]
fn test_second_pass_merges() {
    // A absorbs B in the first pass; only the grown A+B reaches C, which was
    // scanned before B, so C joins in the second pass.
    let a = figure(0.0, 0.0, 10.0, 10.0);
    let b = figure(25.0, 0.0, 35.0, 10.0);
    let c = figure(40.0, 0.0, 50.0, 10.0);
    let clusters = merge_primitives(&[a.clone(), c.clone(), b.clone()], &by_distance(30.0));

    assert_eq!(clusters.len(), 1);
    assert_eq!(clusters[0].rect.as_tuple(), (0.0, 0.0, 50.0, 10.0));
    assert_eq!(clusters[0].members, vec![a, b, c]);
}

#[test]
fn test_scan_order_changes_partition() {
    // B is close to both A and C, but A+B and B+C are each too wide to take
    // the remaining box.
    let a = figure(0.0, 0.0, 10.0, 10.0);
    let b = figure(25.0, 0.0, 35.0, 10.0);
    let c = figure(50.0, 0.0, 60.0, 10.0);
    let params = by_distance(30.0);

    let forward = merge_primitives(&[a.clone(), b.clone(), c.clone()], &params);
    assert_eq!(forward.len(), 2);
    assert_eq!(forward[0].members, vec![a.clone(), b.clone()]);
    assert_eq!(forward[1].members, vec![c.clone()]);

    let rotated = merge_primitives(&[b.clone(), c.clone(), a.clone()], &params);
    assert_eq!(rotated.len(), 2);
    assert_eq!(rotated[0].members, vec![b, c]);
    assert_eq!(rotated[1].members, vec![a]);
}

#[test]
fn test_confidence_is_running_pairwise_mean() {
    let mk = |x0: f64, conf: f64| {
        DetectedPrimitive::new(rect(x0, 0.0, x0 + 10.0, 10.0), ElementCategory::Figure, conf)
    };
    let clusters = merge_primitives(&[mk(0.0, 0.8), mk(20.0, 0.4), mk(40.0, 0.2)], &by_distance(100.0));
    assert_eq!(clusters.len(), 1);
    // ((0.8 + 0.4) / 2 + 0.2) / 2
    assert!((clusters[0].confidence - 0.4).abs() < 1e-12);
}

#[test]
fn test_output_in_first_survivor_order() {
    let params = by_distance(20.0);
    let clusters = merge_primitives(
        &[
            figure(500.0, 0.0, 510.0, 10.0),
            figure(0.0, 0.0, 10.0, 10.0),
            figure(505.0, 5.0, 515.0, 15.0),
            figure(5.0, 5.0, 15.0, 15.0),
        ],
        &params,
    );
    assert_eq!(clusters.len(), 2);
    assert_eq!(clusters[0].rect.as_tuple(), (500.0, 0.0, 515.0, 15.0));
    assert_eq!(clusters[1].rect.as_tuple(), (0.0, 0.0, 15.0, 15.0));
}

#[test]
fn test_cluster_rect_encloses_members() {
    let prims: Vec<_> = (0..12)
        .map(|i| {
            let x = (i % 4) as f64 * 35.0;
            let y = (i / 4) as f64 * 90.0;
            DetectedPrimitive::new(
                rect(x, y, x + 20.0 + i as f64, y + 15.0),
                ElementCategory::Text,
                0.7,
            )
        })
        .collect();
    let clusters = merge_primitives(&prims, &ClusterParams::default());

    let total: usize = clusters.iter().map(|c| c.members.len()).sum();
    assert_eq!(total, prims.len());
    for cluster in &clusters {
        let bound = cluster.members[1..]
            .iter()
            .fold(cluster.members[0].rect, |acc, m| acc.union(&m.rect));
        assert_eq!(bound, cluster.rect);
    }
}

#[test]
fn test_predicates_symmetric_and_bounded() {
    let rects = [
        rect(0.0, 0.0, 10.0, 10.0),
        rect(5.0, 5.0, 25.0, 12.0),
        rect(3.0, 3.0, 3.0, 40.0),
        rect(-20.0, 8.0, 4.0, 9.0),
        rect(100.0, 100.0, 200.0, 300.0),
    ];
    for a in &rects {
        for b in &rects {
            let ab = overlap_ratio(a, b);
            assert_eq!(ab, overlap_ratio(b, a));
            assert!((0.0..=1.0).contains(&ab));
            let d = center_distance(a, b);
            assert_eq!(d, center_distance(b, a));
            assert!(d >= 0.0);
        }
    }
}
