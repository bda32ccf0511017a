//! Property tests for slot storage, identifiers and team packing.

mod common;

use common::software_project;
use proptest::prelude::*;
use std::collections::BTreeMap;
use taskboard::domain::{EntityId, EntityKind, Record};
use taskboard::error::Error;
use taskboard::id_generation::{IdGenerator, parse_index};
use taskboard::service::ProjectService;
use taskboard::storage::{IndexedStore, StoreError};

#[derive(Debug, Clone, PartialEq)]
struct Slot {
    id: EntityId,
    value: u32,
}

impl Record for Slot {
    fn id(&self) -> &EntityId {
        &self.id
    }
}

#[derive(Debug, Clone)]
enum TeamOp {
    Assign(u8),
    Remove(u8),
}

fn team_op() -> impl Strategy<Value = TeamOp> {
    prop_oneof![
        (0u8..6).prop_map(TeamOp::Assign),
        (0u8..6).prop_map(TeamOp::Remove),
    ]
}

fn user(n: u8) -> EntityId {
    EntityId::new(format!("U{n:04}"))
}

proptest! {
    #[test]
    fn prop_generated_ids_strictly_increase(count in 1usize..60) {
        let mut generator = IdGenerator::new(EntityKind::Task);
        let indices: Vec<usize> = (0..count)
            .map(|_| parse_index(generator.generate().as_str(), EntityKind::Task).unwrap())
            .collect();
        prop_assert!(indices.windows(2).all(|w| w[0] < w[1]));
        prop_assert_eq!(indices.last().copied(), Some(count - 1));
    }

    #[test]
    fn prop_growth_keeps_earlier_records(
        initial in 0usize..8,
        indices in prop::collection::btree_set(0usize..200, 1..20)
    ) {
        let mut store = IndexedStore::with_capacity(initial);
        let mut expected = BTreeMap::new();

        for (n, index) in indices.iter().copied().enumerate() {
            let value = u32::try_from(n).unwrap();
            store
                .add(Slot { id: EntityId::new(format!("S{index}")), value }, index)
                .unwrap();
            expected.insert(index, value);

            prop_assert!(store.capacity() > index);
            for (&seen, &value) in &expected {
                prop_assert_eq!(store.get(seen).unwrap().value, value);
            }
        }

        let stored: Vec<u32> = store.get_all().iter().map(|s| s.value).collect();
        let wanted: Vec<u32> = expected.values().copied().collect();
        prop_assert_eq!(stored, wanted);
    }

    #[test]
    fn prop_add_never_overwrites(index in 0usize..64) {
        let mut store = IndexedStore::with_capacity(4);
        store.add(Slot { id: EntityId::new("S1"), value: 1 }, index).unwrap();
        let second = store.add(Slot { id: EntityId::new("S2"), value: 2 }, index);
        prop_assert_eq!(second, Err(StoreError::IndexOccupied(index)));
        prop_assert_eq!(store.get(index).unwrap().value, 1);
    }

    #[test]
    fn prop_team_stays_packed(
        team_size in 1usize..5,
        ops in prop::collection::vec(team_op(), 0..40)
    ) {
        let mut projects = ProjectService::default();
        let project = projects.create(software_project("Team", team_size, 0.0)).unwrap();
        let p = project.id.as_str();
        let mut model: Vec<EntityId> = Vec::new();

        for op in ops {
            match op {
                TeamOp::Assign(n) => {
                    let result = projects.assign_user(p, user(n));
                    if model.contains(&user(n)) {
                        let is_duplicate = matches!(result, Err(Error::DuplicateAssignment { .. }));
                        prop_assert!(is_duplicate);
                    } else if model.len() == team_size {
                        let is_full = matches!(result, Err(Error::TeamFull { .. }));
                        prop_assert!(is_full);
                    } else {
                        prop_assert!(result.is_ok());
                        model.push(user(n));
                    }
                }
                TeamOp::Remove(n) => {
                    let result = projects.remove_user(p, &user(n));
                    if let Some(position) = model.iter().position(|u| *u == user(n)) {
                        prop_assert!(result.is_ok());
                        model.remove(position);
                    } else {
                        let is_missing = matches!(result, Err(Error::NoSuchAssignment { .. }));
                        prop_assert!(is_missing);
                    }
                }
            }
            prop_assert_eq!(projects.list_assigned(p).unwrap(), model.clone());
        }
    }

    #[test]
    fn prop_project_round_trips(
        name in "[A-Za-z][A-Za-z0-9 ]{0,20}",
        team_size in 1usize..50,
        budget in 0.0f64..1.0e6
    ) {
        let mut projects = ProjectService::default();
        let created = projects.create(software_project(&name, team_size, budget)).unwrap();
        let fetched = projects.get_by_id(created.id.as_str()).unwrap();
        prop_assert_eq!(fetched, &created);
        prop_assert_eq!(fetched.name.as_str(), name.trim());
    }
}
