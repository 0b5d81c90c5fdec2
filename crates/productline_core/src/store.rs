use std::collections::BTreeMap;
use std::sync::Arc;

use crate::{CollectionAction, ProductLineId, ProductLineJobCollection};

/// Requests handled by the store.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreAction {
    /// Replace every collection with a fresh one per product line.
    Provision { product_line_ids: Vec<ProductLineId> },
    /// Apply a transition to one product line's collection.
    Route {
        product_line_id: ProductLineId,
        action: CollectionAction,
    },
}

/// Mapping from product line to its job collection.
///
/// Collections sit behind `Arc`s so that routing an action to one product
/// line copies only the map spine; every other entry keeps pointing at the
/// same collection.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProductLineJobsStore {
    collections: BTreeMap<ProductLineId, Arc<ProductLineJobCollection>>,
}

impl ProductLineJobsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reduce(self, action: StoreAction) -> Self {
        match action {
            StoreAction::Provision { product_line_ids } => Self::provision_all(product_line_ids),
            StoreAction::Route {
                product_line_id,
                action,
            } => self.route(product_line_id, action),
        }
    }

    /// Fresh mapping with one empty collection per id. Prior state is discarded.
    pub fn provision_all<I>(product_line_ids: I) -> Self
    where
        I: IntoIterator<Item = ProductLineId>,
    {
        let collections = product_line_ids
            .into_iter()
            .map(|id| (id, Arc::new(ProductLineJobCollection::new())))
            .collect();
        Self { collections }
    }

    /// Applies `action` to the collection of `product_line_id`, starting from
    /// an empty collection when the id is unknown.
    pub fn route(mut self, product_line_id: ProductLineId, action: CollectionAction) -> Self {
        let current = self
            .collections
            .remove(&product_line_id)
            .map(Arc::unwrap_or_clone)
            .unwrap_or_default();
        self.collections
            .insert(product_line_id, Arc::new(current.apply(action)));
        self
    }

    pub fn get(&self, product_line_id: &str) -> Option<&ProductLineJobCollection> {
        self.collections.get(product_line_id).map(Arc::as_ref)
    }

    /// Shared handle to a collection, for callers that keep a snapshot.
    pub fn handle(&self, product_line_id: &str) -> Option<Arc<ProductLineJobCollection>> {
        self.collections.get(product_line_id).cloned()
    }

    pub fn product_line_ids(&self) -> impl Iterator<Item = &ProductLineId> {
        self.collections.keys()
    }

    pub fn len(&self) -> usize {
        self.collections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }
}
