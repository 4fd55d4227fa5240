//! SiteIndex assignment: name order, assigned once, never changed

use std::rc::Rc;

use rampart_shared::{
    assign_site_indices, BombSite, HostType, ObjectiveConfig, ObjectiveWorld, SiteKey, Vec3,
};
use rampart_test::RecordingPolicy;

fn site(name: &str, policy: &Rc<RecordingPolicy>) -> BombSite {
    BombSite::new(
        HostType::Server,
        name,
        Vec3::ZERO,
        ObjectiveConfig::default(),
        policy.clone(),
    )
}

fn indices(sites: &[BombSite]) -> Vec<i32> {
    sites.iter().map(|site| site.index()).collect()
}

#[test]
fn indices_follow_name_order() {
    let policy = RecordingPolicy::new();
    let mut sites = vec![site("B", &policy), site("A", &policy), site("C", &policy)];
    assert_eq!(indices(&sites), vec![-1, -1, -1]);

    let assigned = assign_site_indices(&mut sites);

    assert_eq!(assigned, 3);
    assert_eq!(indices(&sites), vec![1, 0, 2]);
}

#[test]
fn rerunning_assignment_is_a_no_op() {
    let policy = RecordingPolicy::new();
    let mut sites = vec![site("B", &policy), site("A", &policy), site("C", &policy)];
    assign_site_indices(&mut sites);

    let assigned = assign_site_indices(&mut sites);

    assert_eq!(assigned, 0);
    assert_eq!(indices(&sites), vec![1, 0, 2]);
}

#[test]
fn preassigned_index_is_kept() {
    let policy = RecordingPolicy::new();
    let mut sites = vec![
        site("B", &policy),
        site("A", &policy).with_index(7),
        site("C", &policy),
    ];

    assign_site_indices(&mut sites);

    assert_eq!(indices(&sites), vec![1, 7, 2]);
}

#[test]
fn objective_world_assigns_at_level_load() {
    let mut world = ObjectiveWorld::new(
        HostType::Server,
        ObjectiveConfig::default(),
        RecordingPolicy::new(),
    );
    let b = world.add_site("B", Vec3::X);
    let a = world.add_site("A", Vec3::Y);
    let c = world.add_site("C", Vec3::Z);

    assert_eq!(world.assign_site_indices(), 3);
    assert_eq!(world.assign_site_indices(), 0);

    let index = |key: SiteKey| world.site(&key).map(|site| site.index());
    assert_eq!(index(b), Some(1));
    assert_eq!(index(a), Some(0));
    assert_eq!(index(c), Some(2));
    assert_eq!(world.site_by_name("C"), Some(c));
}
