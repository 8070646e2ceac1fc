//! The ticker store.
//!
//! Mapping from symbol to instrument record plus seven category
//! index-sets. All operations are synchronous and in-memory; the store
//! is owned by the single dispatch task and has no locking.

use board_core::{CatalogRecord, Category, Classify, PairRecord, Symbol, TickerUpdate};
use indexmap::IndexSet;
use std::collections::HashMap;
use tracing::debug;

/// Merged instrument catalog with additive category indices.
///
/// Category membership is union-based and never shrinks: once a batch
/// places a symbol in an index, no later batch removes it, even if the
/// later batch's classification would not include it. This replicates
/// the behavior of the system the feed was built against; see DESIGN.md
/// before "fixing" it.
///
/// The store does not enforce seed-before-update ordering. An update
/// for a never-seeded symbol creates a partial record holding only the
/// refreshed price fields.
pub struct TickerStore {
    pairs: HashMap<Symbol, PairRecord>,
    indices: HashMap<Category, IndexSet<Symbol>>,
}

impl TickerStore {
    /// Create an empty store. Empty is a valid, operable state; a failed
    /// catalog fetch seeds with an empty batch rather than erroring.
    pub fn new() -> Self {
        let indices = Category::ALL
            .iter()
            .map(|&c| (c, IndexSet::new()))
            .collect();
        Self {
            pairs: HashMap::new(),
            indices,
        }
    }

    /// Seed from a catalog batch: full upsert of every record, plus
    /// category classification unioned into the indices.
    pub fn seed(&mut self, batch: &[CatalogRecord]) {
        for record in batch {
            self.pairs
                .insert(record.symbol.clone(), PairRecord::from_catalog(record));
            self.index(record);
        }
        debug!(records = batch.len(), total = self.pairs.len(), "seeded catalog batch");
    }

    /// Merge a feed tick batch: replace only the price fields of known
    /// symbols; unknown symbols get a partial record. Index membership
    /// is recomputed from the batch and unioned in, same as `seed`.
    pub fn update(&mut self, batch: &[TickerUpdate]) {
        for tick in batch {
            match self.pairs.get_mut(&tick.symbol) {
                Some(record) => record.apply_tick(tick),
                None => {
                    debug!(symbol = %tick.symbol, "tick for unseeded symbol, inserting partial record");
                    self.pairs
                        .insert(tick.symbol.clone(), PairRecord::from_tick(tick));
                }
            }
            self.index(tick);
        }
    }

    /// Union a record's classification into the indices. Additive only.
    fn index(&mut self, record: &impl Classify) {
        for category in record.categories() {
            if let Some(set) = self.indices.get_mut(&category) {
                set.insert(record.symbol().clone());
            }
        }
    }

    /// Records of a category, in index insertion order.
    pub fn rows(&self, category: Category) -> Vec<&PairRecord> {
        self.indices
            .get(&category)
            .into_iter()
            .flat_map(|set| set.iter())
            .filter_map(|symbol| self.pairs.get(symbol))
            .collect()
    }

    /// Look up a single record.
    pub fn get(&self, symbol: &Symbol) -> Option<&PairRecord> {
        self.pairs.get(symbol)
    }

    /// Number of known instruments.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Number of symbols in a category index.
    pub fn category_len(&self, category: Category) -> usize {
        self.indices.get(&category).map_or(0, IndexSet::len)
    }
}

impl Default for TickerStore {
    fn default() -> Self {
        Self::new()
    }
}
