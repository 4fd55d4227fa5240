//! PROPERTY-BASED TESTS: OnChange change detection
//!
//! Key invariants:
//! 1. Values staying within the threshold of the last sent value are never
//!    re-encoded after the first send
//! 2. A single jump past the threshold is encoded exactly once, and the last
//!    sent value becomes the new value rather than an intermediate sample
//! 3. Drift is measured against the last sent value, so small steps that add
//!    up past the threshold are eventually sent

use proptest::prelude::*;

use rampart_shared::{
    Quat, ReplicatedProperty, SnapshotWriter, Transform, TransformThreshold, Vec3,
};

struct Gauge {
    value: f32,
}

fn gauge_property(threshold: f32) -> ReplicatedProperty<Gauge, f32> {
    ReplicatedProperty::on_change(
        "value",
        |gauge: &Gauge| gauge.value,
        |gauge: &mut Gauge, value| gauge.value = value,
        threshold,
    )
}

fn encode_all(property: &mut ReplicatedProperty<Gauge, f32>, values: &[f32]) -> usize {
    let mut writer = SnapshotWriter::new();
    values
        .iter()
        .filter(|value| property.encode(&Gauge { value: **value }, &mut writer))
        .count()
}

proptest! {
    #[test]
    fn prop_sub_threshold_values_are_not_resent(
        first in -100.0f32..100.0,
        offsets in prop::collection::vec(-0.45f32..0.45, 1..32),
    ) {
        let mut property = gauge_property(0.5);
        let mut values = vec![first];
        values.extend(offsets.iter().map(|offset| first + offset));

        prop_assert_eq!(encode_all(&mut property, &values), 1);
        prop_assert_eq!(property.last_sent(), Some(&first));
    }

    #[test]
    fn prop_one_jump_is_sent_once(
        first in -100.0f32..100.0,
        jump in 0.6f32..10.0,
        negative in any::<bool>(),
        repeats in 1usize..8,
    ) {
        let mut property = gauge_property(0.5);
        let jumped = if negative { first - jump } else { first + jump };

        let mut values = vec![first];
        values.extend(std::iter::repeat(jumped).take(repeats));

        prop_assert_eq!(encode_all(&mut property, &values), 2);
        prop_assert_eq!(property.last_sent(), Some(&jumped));
    }
}

#[test]
fn accumulated_drift_is_sent_against_the_last_sent_value() {
    let mut property = gauge_property(0.5);
    let values = [0.0, 0.125, 0.25, 0.375, 0.5, 0.625, 0.75];

    let mut writer = SnapshotWriter::new();
    let sent: Vec<bool> = values
        .iter()
        .map(|value| property.encode(&Gauge { value: *value }, &mut writer))
        .collect();

    // 0.5 is not more than the threshold away from 0.0, 0.625 is
    assert_eq!(sent, vec![true, false, false, false, false, true, false]);
    assert_eq!(property.last_sent(), Some(&0.625));
    assert_eq!(writer.bytes_written(), 8);
}

#[test]
fn always_mode_encodes_every_pass() {
    let mut property: ReplicatedProperty<Gauge, f32> = ReplicatedProperty::always(
        "value",
        |gauge: &Gauge| gauge.value,
        |gauge: &mut Gauge, value| gauge.value = value,
    );
    assert_eq!(encode_all(&mut property, &[1.0, 1.0, 1.0]), 3);
}

struct Body {
    transform: Transform,
}

fn body_property() -> ReplicatedProperty<Body, Transform> {
    ReplicatedProperty::on_change(
        "transform",
        |body: &Body| body.transform,
        |body: &mut Body, value| body.transform = value,
        TransformThreshold::new(0.1, 0.1),
    )
}

#[test]
fn rotation_change_resends_the_whole_transform() {
    let mut property = body_property();
    let mut writer = SnapshotWriter::new();

    let start = Body {
        transform: Transform::IDENTITY,
    };
    assert!(property.encode(&start, &mut writer));

    // position moves under its threshold, rotation over its own
    let turned = Transform::new(Vec3::new(0.05, 0.0, 0.0), Quat::from_rotation_y(0.5));
    assert!(property.encode(&Body { transform: turned }, &mut writer));

    assert_eq!(property.last_sent(), Some(&turned));
    assert_eq!(writer.bytes_written(), 56);
}

#[test]
fn small_transform_changes_are_held_back() {
    let mut property = body_property();
    let mut writer = SnapshotWriter::new();

    assert!(property.encode(
        &Body {
            transform: Transform::IDENTITY
        },
        &mut writer
    ));

    let nudged = Transform::new(Vec3::new(0.05, 0.0, 0.0), Quat::from_rotation_y(0.05));
    assert!(!property.encode(&Body { transform: nudged }, &mut writer));

    assert_eq!(property.last_sent(), Some(&Transform::IDENTITY));
}
