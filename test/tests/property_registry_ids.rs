//! PROPERTY-BASED TESTS: NetworkId assignment
//!
//! Key invariants:
//! 1. Ids returned by `register` are pairwise distinct and strictly increasing
//! 2. No two live entities ever share an id, with deregistration interleaved

use std::collections::HashSet;

use proptest::prelude::*;

use rampart_server::EntityRegistry;
use rampart_shared::NetworkId;
use rampart_test::TestEntity;

#[derive(Clone, Debug)]
enum RegistryOp {
    Register(u64),
    Deregister(u64),
}

fn registry_op_strategy() -> impl Strategy<Value = RegistryOp> {
    prop_oneof![
        3 => (0u64..16).prop_map(RegistryOp::Register),
        1 => (0u64..16).prop_map(RegistryOp::Deregister),
    ]
}

proptest! {
    /// Every registration yields an id above all ids handed out before it
    #[test]
    fn prop_ids_strictly_increase(entities in prop::collection::vec(0u64..1000, 1..64)) {
        let mut registry = EntityRegistry::new();
        let mut issued: Vec<NetworkId> = Vec::new();

        for entity in entities {
            let network_id = registry.register(TestEntity::new(entity)).unwrap();
            if let Some(last) = issued.last() {
                prop_assert!(network_id > *last);
            }
            issued.push(network_id);
        }

        let distinct: HashSet<NetworkId> = issued.iter().copied().collect();
        prop_assert_eq!(distinct.len(), issued.len());
    }

    /// The id -> entity and entity -> id views always agree
    #[test]
    fn prop_live_ids_are_unique(ops in prop::collection::vec(registry_op_strategy(), 1..128)) {
        let mut registry = EntityRegistry::new();
        let mut highest: Option<NetworkId> = None;

        for op in ops {
            match op {
                RegistryOp::Register(entity) => {
                    let network_id = registry.register(TestEntity::new(entity)).unwrap();
                    if let Some(highest) = highest {
                        prop_assert!(network_id > highest);
                    }
                    highest = Some(network_id);
                }
                RegistryOp::Deregister(entity) => {
                    registry.deregister(&TestEntity::new(entity));
                }
            }

            let mut entities = HashSet::new();
            for (network_id, entity) in registry.iter() {
                prop_assert!(entities.insert(entity), "entity bound twice");
                prop_assert_eq!(registry.network_id(&entity), Some(network_id));
            }
            prop_assert_eq!(entities.len(), registry.len());
        }
    }
}
