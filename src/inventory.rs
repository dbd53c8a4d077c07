//! Seed stock and harvested-crop storage.

use crate::crop::SeedKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Seed counts to plant from, harvested counts collected with the shovel.
/// Counts are unsigned, so they can never go negative; consume-style
/// operations report failure instead of changing anything.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Inventory {
    seeds: BTreeMap<SeedKind, u32>,
    harvested: BTreeMap<SeedKind, u32>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add seeds of a kind. Never fails.
    pub fn add_seeds(&mut self, kind: SeedKind, count: u32) {
        if count > 0 {
            *self.seeds.entry(kind).or_insert(0) += count;
        }
    }

    /// Consume one seed. Returns false (and changes nothing) when none
    /// are left.
    pub fn remove_seed(&mut self, kind: SeedKind) -> bool {
        match self.seeds.get_mut(&kind) {
            Some(count) if *count > 0 => {
                *count -= 1;
                if *count == 0 {
                    self.seeds.remove(&kind);
                }
                true
            }
            _ => false,
        }
    }

    /// Record one harvested crop. Never fails.
    pub fn add_harvest(&mut self, kind: SeedKind) {
        *self.harvested.entry(kind).or_insert(0) += 1;
    }

    pub fn seed_count(&self, kind: SeedKind) -> u32 {
        self.seeds.get(&kind).copied().unwrap_or(0)
    }

    pub fn harvested_count(&self, kind: SeedKind) -> u32 {
        self.harvested.get(&kind).copied().unwrap_or(0)
    }

    /// Whether any seed of any kind is available.
    pub fn has_any_seed(&self) -> bool {
        self.seeds.values().any(|&c| c > 0)
    }

    /// Available seed kinds with their counts, in deterministic order.
    /// Restartable: call again for a fresh pass.
    pub fn seed_stock(&self) -> impl Iterator<Item = (SeedKind, u32)> + '_ {
        self.seeds
            .iter()
            .filter(|(_, &count)| count > 0)
            .map(|(&kind, &count)| (kind, count))
    }
}
