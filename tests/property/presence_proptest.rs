//! Property-based tests for the presence registry
//!
//! Random register/release/unregister sequences are checked against a
//! simple model: each user maps to the id of their newest connection.

use std::collections::HashMap;

use proptest::prelude::*;
use uuid::Uuid;

use plaza::backend::realtime::{ConnectionHandle, PresenceRegistry};

#[derive(Debug, Clone)]
enum Op {
    Register(usize),
    ReleaseLatest(usize),
    ReleaseStale(usize),
    Unregister(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    (0usize..4, 0usize..3).prop_map(|(kind, user)| match kind {
        0 => Op::Register(user),
        1 => Op::ReleaseLatest(user),
        2 => Op::ReleaseStale(user),
        _ => Op::Unregister(user),
    })
}

proptest! {
    #[test]
    fn test_registry_matches_model(ops in proptest::collection::vec(op_strategy(), 1..40)) {
        let users: Vec<Uuid> = (0..3).map(|_| Uuid::new_v4()).collect();
        let registry = PresenceRegistry::new();
        let mut model: HashMap<Uuid, Uuid> = HashMap::new();
        // Keep both ends alive so registered channels stay open.
        let mut live = Vec::new();
        let mut history: HashMap<Uuid, Vec<Uuid>> = HashMap::new();

        for op in ops {
            match op {
                Op::Register(i) => {
                    let (handle, rx) = ConnectionHandle::open();
                    registry.register(users[i], &handle);
                    model.insert(users[i], handle.id());
                    history.entry(users[i]).or_default().push(handle.id());
                    live.push((handle, rx));
                }
                Op::ReleaseLatest(i) => {
                    if let Some(&conn) = model.get(&users[i]) {
                        prop_assert!(registry.release(users[i], conn));
                        model.remove(&users[i]);
                    }
                }
                Op::ReleaseStale(i) => {
                    let current = model.get(&users[i]).copied();
                    let stale = history
                        .get(&users[i])
                        .and_then(|ids| ids.iter().find(|id| Some(**id) != current).copied());
                    if let Some(stale) = stale {
                        prop_assert!(!registry.release(users[i], stale));
                    }
                }
                Op::Unregister(i) => {
                    registry.unregister(users[i]);
                    model.remove(&users[i]);
                }
            }

            for user in &users {
                let found = registry.lookup(*user).map(|handle| handle.id());
                prop_assert_eq!(found, model.get(user).copied());
            }
            prop_assert_eq!(registry.online_count(), model.len());
        }
    }
}
