use std::sync::Arc;

use productline_core::{
    CollectionAction, ErrorInfo, JobRecord, ProductLineJobCollection, ProductLineJobsStore,
    StoreAction, Timestamp,
};

fn ts(raw: &str) -> Timestamp {
    raw.parse().expect("rfc3339 timestamp")
}

fn ids(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|id| id.to_string()).collect()
}

fn init_logging() {
    productline_logging::initialize_for_tests();
}

#[test]
fn provision_creates_one_default_collection_per_id() {
    init_logging();
    let store = ProductLineJobsStore::new().reduce(StoreAction::Provision {
        product_line_ids: ids(&["pl-2", "pl-1", "pl-3"]),
    });

    let keys: Vec<_> = store.product_line_ids().cloned().collect();
    assert_eq!(keys, ids(&["pl-1", "pl-2", "pl-3"]));
    for key in &keys {
        let collection = store.get(key).unwrap();
        assert_eq!(collection, &ProductLineJobCollection::default());
        assert!(!collection.is_fetching());
        assert!(collection.records().is_empty());
        assert!(collection.error().is_none());
    }
}

#[test]
fn provision_is_a_full_reset() {
    init_logging();
    let store = ProductLineJobsStore::provision_all(ids(&["pl-1", "pl-2"]))
        .route(
            "pl-1".to_string(),
            CollectionAction::FetchSucceeded {
                job_ids: ids(&["a"]),
            },
        )
        .route(
            "pl-2".to_string(),
            CollectionAction::FetchFailed {
                error: ErrorInfo::new("boom"),
            },
        );

    let store = store.reduce(StoreAction::Provision {
        product_line_ids: ids(&["pl-1", "pl-3"]),
    });

    assert_eq!(store.len(), 2);
    assert!(store.get("pl-2").is_none());
    assert_eq!(store.get("pl-1"), Some(&ProductLineJobCollection::default()));
    assert_eq!(store.get("pl-3"), Some(&ProductLineJobCollection::default()));
}

#[test]
fn provision_with_no_ids_empties_the_store() {
    let store = ProductLineJobsStore::provision_all(ids(&["pl-1"]))
        .reduce(StoreAction::Provision {
            product_line_ids: Vec::new(),
        });
    assert!(store.is_empty());
}

#[test]
fn routing_touches_only_the_target_collection() {
    init_logging();
    let before = ProductLineJobsStore::provision_all(ids(&["pl-1", "pl-2", "pl-3"]));

    let after = before.clone().reduce(StoreAction::Route {
        product_line_id: "pl-2".to_string(),
        action: CollectionAction::BeginFetch {
            since_date: ts("2024-01-01T00:00:00Z"),
        },
    });

    assert!(after.get("pl-2").unwrap().is_fetching());
    assert!(!before.get("pl-2").unwrap().is_fetching());
    for untouched in ["pl-1", "pl-3"] {
        assert!(Arc::ptr_eq(
            &before.handle(untouched).unwrap(),
            &after.handle(untouched).unwrap()
        ));
    }
    assert!(!Arc::ptr_eq(
        &before.handle("pl-2").unwrap(),
        &after.handle("pl-2").unwrap()
    ));
}

#[test]
fn routing_to_unknown_id_starts_from_default() {
    init_logging();
    let store = ProductLineJobsStore::provision_all(ids(&["pl-1"])).route(
        "late".to_string(),
        CollectionAction::FetchSucceeded {
            job_ids: ids(&["a", "b"]),
        },
    );

    assert_eq!(store.len(), 2);
    assert_eq!(
        store.get("late").unwrap().records(),
        &[JobRecord::shell("a"), JobRecord::shell("b")]
    );
}

#[test]
fn concurrent_fetches_for_different_lines_do_not_interfere() {
    init_logging();
    let store = ProductLineJobsStore::provision_all(ids(&["pl-1", "pl-2"]))
        .route(
            "pl-1".to_string(),
            CollectionAction::BeginFetch {
                since_date: ts("2024-01-01T00:00:00Z"),
            },
        )
        .route(
            "pl-2".to_string(),
            CollectionAction::BeginFetch {
                since_date: ts("2024-01-02T00:00:00Z"),
            },
        )
        // pl-2 resolves before pl-1.
        .route(
            "pl-2".to_string(),
            CollectionAction::FetchFailed {
                error: ErrorInfo::new("pl-2 failed"),
            },
        )
        .route(
            "pl-1".to_string(),
            CollectionAction::FetchSucceeded {
                job_ids: ids(&["a"]),
            },
        );

    let first = store.get("pl-1").unwrap();
    assert!(!first.is_fetching());
    assert_eq!(first.records(), &[JobRecord::shell("a")]);
    assert!(first.error().is_none());

    let second = store.get("pl-2").unwrap();
    assert!(!second.is_fetching());
    assert!(second.records().is_empty());
    assert_eq!(second.error().unwrap().message, "pl-2 failed");
}

#[test]
fn snapshot_handles_are_not_mutated_by_later_routes() {
    let store = ProductLineJobsStore::provision_all(ids(&["pl-1"]));
    let snapshot = store.handle("pl-1").unwrap();

    let store = store.route(
        "pl-1".to_string(),
        CollectionAction::FetchSucceeded {
            job_ids: ids(&["a"]),
        },
    );

    assert!(snapshot.records().is_empty());
    assert_eq!(store.get("pl-1").unwrap().records().len(), 1);
}
