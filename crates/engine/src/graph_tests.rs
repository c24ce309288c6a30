// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use ccm_core::Target;

fn position(order: &[TargetId], id: TargetId) -> usize {
    order.iter().position(|&x| x == id).unwrap()
}

#[test]
fn chain_is_ordered_leaf_first() {
    let mut b = BuildSpec::builder("cc");
    let a = b.add_target(Target::new("a"));
    let bb = b.add_target(Target::new("b").with_deps([a]));
    let c = b.add_target(Target::new("c").with_deps([bb]));
    let spec = b.build();

    let arena = Arena::new();
    let schedule = build_schedule(&spec, &arena).unwrap();

    assert!(position(&schedule.order, a) < position(&schedule.order, bb));
    assert!(position(&schedule.order, bb) < position(&schedule.order, c));
    assert_eq!(schedule.level(a), 1);
    assert_eq!(schedule.level(bb), 2);
    assert_eq!(schedule.level(c), 3);
}

#[test]
fn diamond_levels_take_the_max_of_both_parents() {
    let mut b = BuildSpec::builder("cc");
    let a = b.add_target(Target::new("a"));
    let left = b.add_target(Target::new("left").with_deps([a]));
    let right = b.add_target(Target::new("right").with_deps([a]));
    let d = b.add_target(Target::new("d").with_deps([left, right]));
    let spec = b.build();

    let arena = Arena::new();
    let schedule = build_schedule(&spec, &arena).unwrap();

    assert_eq!(schedule.level(d), 3);
    assert_eq!(schedule.reverse_edges(a).len(), 2);
    assert!(schedule.reverse_edges(a).contains(&left));
    assert!(schedule.reverse_edges(a).contains(&right));
}

#[test]
fn cycle_is_detected() {
    let mut b = BuildSpec::builder("cc");
    let a = b.add_target(Target::new("a"));
    let bid = b.add_target(Target::new("b").with_deps([a]));
    // retroactively close the cycle a -> b -> a
    b.targets_mut()[a.index()].deps.push(bid);
    let spec = b.build();

    let arena = Arena::new();
    let err = build_schedule(&spec, &arena).unwrap_err();
    assert!(matches!(err, EngineError::Core(CoreError::Cycle(_))));
}

#[test]
fn duplicate_declared_targets_are_collected_once() {
    let mut b = BuildSpec::builder("cc");
    let shared = b.add_target(Target::new("shared"));
    let top = b.add_target(Target::new("top").with_deps([shared, shared]));
    let spec = b.build();

    let arena = Arena::new();
    let schedule = build_schedule(&spec, &arena).unwrap();

    assert_eq!(
        schedule.order.iter().filter(|&&id| id == shared).count(),
        1
    );
    assert_eq!(schedule.reverse_edges(shared).len(), 2);
    assert_eq!(schedule.reverse_edges(shared), &[top, top]);
}

#[test]
fn reverse_edges_are_complete_for_every_declared_edge() {
    let mut b = BuildSpec::builder("cc");
    let a = b.add_target(Target::new("a"));
    let bb = b.add_target(Target::new("b").with_deps([a]));
    let spec = b.build();

    let arena = Arena::new();
    let schedule = build_schedule(&spec, &arena).unwrap();
    assert!(schedule.reverse_edges(a).contains(&bb));
}
