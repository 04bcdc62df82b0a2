mod common;

use anyhow::Result;
use hublab::graph::{Direction, INFTY};
use hublab::labeling::{LabelEntry, Labeling};
use hublab::order;

fn sample() -> Labeling {
    // Hand-built labeling of the unit-weight path 0-1-2 with order
    // [1, 0, 2]: hub ids are order positions.
    let mut l = Labeling::new(3);
    for v in 0..3 {
        l.add(v, Direction::Forward, 0, if v == 1 { 0 } else { 1 });
        l.add(v, Direction::Reverse, 0, if v == 1 { 0 } else { 1 });
    }
    l.add(0, Direction::Forward, 1, 0);
    l.add(0, Direction::Reverse, 1, 0);
    l.add(2, Direction::Forward, 2, 0);
    l.add(2, Direction::Reverse, 2, 0);
    l.sort();
    l
}

#[test]
fn test_query() {
    let l = sample();
    assert_eq!(l.query(0, 2, Direction::Forward), 2);
    assert_eq!(l.query(2, 0, Direction::Reverse), 2);
    assert_eq!(l.query(0, 1, Direction::Forward), 1);
    assert_eq!(l.query(1, 1, Direction::Forward), 0);
}

#[test]
fn test_query_empty_intersection_is_unreachable() {
    let mut l = Labeling::new(2);
    l.add(0, Direction::Forward, 0, 0);
    l.add(1, Direction::Reverse, 1, 0);
    l.sort();
    assert_eq!(l.query(0, 1, Direction::Forward), INFTY);
}

#[test]
fn test_sort_is_idempotent() {
    let mut l = sample();
    let before: Vec<Vec<LabelEntry>> = (0..3)
        .flat_map(|v| Direction::BOTH.map(|s| l.label(v, s).to_vec()))
        .collect();
    l.sort();
    let after: Vec<Vec<LabelEntry>> = (0..3)
        .flat_map(|v| Direction::BOTH.map(|s| l.label(v, s).to_vec()))
        .collect();
    assert_eq!(before, after);
    common::assert_sorted(&l);
}

#[test]
fn test_removing_an_entry_never_decreases_queries() {
    let l = sample();
    for v in 0..3 {
        for side in Direction::BOTH {
            for i in 0..l.label(v, side).len() {
                let mut pruned = sample();
                pruned.label_mut(v, side).remove(i);
                for u in 0..3 {
                    for w in 0..3 {
                        for dir in Direction::BOTH {
                            assert!(pruned.query(u, w, dir) >= l.query(u, w, dir));
                        }
                    }
                }
            }
        }
    }
}

#[test]
fn test_stats() {
    let l = sample();
    assert_eq!(l.max(), 2);
    assert!((l.avg() - 10.0 / 6.0).abs() < 1e-9);
}

#[test]
fn test_label_file_round_trip() -> Result<()> {
    let l = sample();
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("sample.labels");
    l.write(&path)?;
    let back = Labeling::read(&path, Some(3))?;
    for v in 0..3 {
        for side in Direction::BOTH {
            assert_eq!(l.label(v, side), back.label(v, side));
        }
    }
    Ok(())
}

#[test]
fn test_label_file_vertex_count_mismatch() -> Result<()> {
    let l = sample();
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("sample.labels");
    l.write(&path)?;
    assert!(Labeling::read(&path, Some(4)).is_err());
    Ok(())
}

#[test]
fn test_order_file_round_trip() -> Result<()> {
    let order = vec![4, 0, 3, 1, 2];
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("graph.order");
    order::write(&path, &order)?;
    assert_eq!(order::read(&path)?, order);
    Ok(())
}

#[test]
fn test_order_file_truncated() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("graph.order");
    std::fs::write(&path, "3\n0\n1\n")?;
    assert!(order::read(&path).is_err());
    Ok(())
}

#[test]
fn test_degree_order_breaks_ties_toward_larger_id() {
    // A star around 1 plus an extra arc 3 -> 0: total degrees 3, 6, 2, 3.
    let mut builder = hublab::graph::GraphBuilder::new(4);
    assert!(builder.arc(1, 0, 1, true));
    assert!(builder.arc(1, 2, 1, true));
    assert!(builder.arc(1, 3, 1, true));
    assert!(builder.arc(3, 0, 2, false));
    let g = builder.build();
    assert_eq!(order::by_degree(&g), vec![1, 3, 0, 2]);
}
