use entrybook::{Filter, Record, RecordId, Run, Session, Store, StoreError};
use proptest::prelude::*;
use std::collections::BTreeMap;

const TERRAINS: [&str; 3] = ["Trail", "Road", "Track"];
const DURATIONS: [&str; 3] = ["Short", "Medium", "Long"];

#[derive(Clone, Debug)]
enum Op {
    Add(RecordId, Run),
    Edit(RecordId, Run),
    Delete(RecordId),
}

fn arb_run() -> impl Strategy<Value = Run> {
    ("[0-9]{1,2}km", 0..TERRAINS.len(), 0..DURATIONS.len()).prop_map(|(distance, t, d)| Run {
        distance,
        terrain: TERRAINS[t].to_string(),
        duration: DURATIONS[d].to_string(),
    })
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (1..10u64, arb_run()).prop_map(|(id, run)| Op::Add(id, run)),
        2 => (1..10u64, arb_run()).prop_map(|(id, run)| Op::Edit(id, run)),
        2 => (1..10u64).prop_map(Op::Delete),
    ]
}

/// Every index entry points at a live record holding that value, every live
/// record appears exactly once under its value, and no key maps to nothing
fn assert_indexes_consistent(store: &Store<Run>, model: &BTreeMap<RecordId, Run>) {
    for field in Run::indexed_field_names() {
        for value in store.distinct_values(field) {
            let ids = store.ids_for(field, value).expect("listed value has an entry");
            assert!(!ids.is_empty(), "empty sequence for {}={}", field, value);
            for id in ids {
                let record = model.get(id).expect("indexed id exists");
                assert_eq!(record.field(field), Some(value));
            }
        }

        for (id, record) in model {
            let value = record.field(field).unwrap();
            let ids = store.ids_for(field, value).unwrap_or(&[]);
            assert_eq!(ids.iter().filter(|x| *x == id).count(), 1, "{} missing from {}={}", id, field, value);
        }
    }
}

proptest! {
    #[test]
    fn prop_store_matches_model(ops in prop::collection::vec(arb_op(), 0..40)) {
        let mut store = Store::new();
        let mut model: BTreeMap<RecordId, Run> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Add(id, run) => {
                    let result = store.add(id, run.clone());
                    if model.contains_key(&id) {
                        prop_assert_eq!(result, Err(StoreError::DuplicateIdentifier { kind: "Run", id }));
                    } else {
                        prop_assert!(result.is_ok());
                        model.insert(id, run);
                    }
                }
                Op::Edit(id, run) => {
                    let result = store.edit(id, run.clone());
                    if model.contains_key(&id) {
                        prop_assert!(result.is_ok());
                        model.insert(id, run);
                    } else {
                        prop_assert_eq!(result, Err(StoreError::NotFound { kind: "Run", id }));
                    }
                }
                Op::Delete(id) => {
                    let result = store.delete(id);
                    if model.remove(&id).is_some() {
                        prop_assert!(result.is_ok());
                        prop_assert!(store.get(id).is_none());
                        for field in Run::indexed_field_names() {
                            for value in store.distinct_values(field) {
                                prop_assert!(!store.ids_for(field, value).unwrap().contains(&id));
                            }
                        }
                    } else {
                        prop_assert_eq!(result, Err(StoreError::NotFound { kind: "Run", id }));
                    }
                }
            }

            prop_assert_eq!(store.len(), model.len());
            for (id, run) in &model {
                prop_assert_eq!(store.get(*id), Some(run));
            }
            assert_indexes_consistent(&store, &model);

            let expected_next = model.keys().next_back().map_or(1, |max| max + 1);
            prop_assert_eq!(store.suggested_next_id(), expected_next);
        }
    }

    #[test]
    fn prop_search_matches_scan(
        runs in prop::collection::btree_map(1..20u64, arb_run(), 0..12),
        terrain in 0..TERRAINS.len(),
        duration in 0..DURATIONS.len(),
    ) {
        let mut store = Store::new();
        for (id, run) in &runs {
            store.add(*id, run.clone()).unwrap();
        }

        let all: Vec<RecordId> = store.search(&[]).into_iter().map(|(id, _)| id).collect();
        prop_assert_eq!(all, runs.keys().copied().collect::<Vec<_>>());

        let by_terrain: Vec<RecordId> = store
            .search(&[Filter::eq("terrain", TERRAINS[terrain])])
            .into_iter()
            .map(|(id, _)| id)
            .collect();
        let expected: Vec<RecordId> = runs
            .iter()
            .filter(|(_, run)| run.terrain == TERRAINS[terrain])
            .map(|(id, _)| *id)
            .collect();
        prop_assert_eq!(by_terrain, expected);

        let both = store.search(&[
            Filter::eq("terrain", TERRAINS[terrain]),
            Filter::eq("duration", DURATIONS[duration]),
        ]);
        let expected: Vec<(RecordId, String)> = runs
            .iter()
            .filter(|(_, run)| run.terrain == TERRAINS[terrain] && run.duration == DURATIONS[duration])
            .map(|(id, run)| (*id, run.distance.clone()))
            .collect();
        prop_assert_eq!(both, expected);
    }

    #[test]
    fn prop_session_next_id(ops in prop::collection::vec(arb_op(), 0..40)) {
        let mut session: Session<Run> = Session::new();

        for op in ops {
            let _ = match op {
                Op::Add(id, run) => session.add(id, run),
                Op::Edit(id, run) => session.edit(id, run),
                Op::Delete(id) => session.delete(id),
            };
            let expected = session.store().max_id().map_or(1, |max| max + 1);
            prop_assert_eq!(session.next_id(), expected);
        }
    }
}

#[test]
fn test_example_scenarios() {
    let mut store = Store::new();
    assert_eq!(store.suggested_next_id(), 1);

    store.add(1, Run { distance: "5km".into(), terrain: "Trail".into(), duration: "Short".into() }).unwrap();
    store.add(2, Run { distance: "21km".into(), terrain: "Trail".into(), duration: "Long".into() }).unwrap();
    store.delete(1).unwrap();
    assert_eq!(store.ids_for("terrain", "Trail"), Some(&[2][..]));
    assert_eq!(store.ids_for("duration", "Short"), None);

    store.edit(2, Run { distance: "21km".into(), terrain: "Road".into(), duration: "Long".into() }).unwrap();
    assert_eq!(store.ids_for("terrain", "Trail"), None);
    assert_eq!(store.ids_for("terrain", "Road"), Some(&[2][..]));

    assert!(matches!(store.delete(99), Err(StoreError::NotFound { id: 99, .. })));
    assert_eq!(store.suggested_next_id(), 3);
}
