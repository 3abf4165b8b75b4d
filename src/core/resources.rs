//! Resource kinds and the per-player resource ledger.
//!
//! The ledger is a fixed array indexed by `ResourceKind`, so every match on
//! a kind is checked for exhaustiveness and no entry can go negative:
//! debits are validated before anything is written.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// The five resources of the game, in ledger order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    Food,
    Wood,
    Stone,
    Clay,
    Gold,
}

impl ResourceKind {
    /// All kinds in ledger order.
    pub const ALL: [ResourceKind; 5] = [
        ResourceKind::Food,
        ResourceKind::Wood,
        ResourceKind::Stone,
        ResourceKind::Clay,
        ResourceKind::Gold,
    ];

    /// Building materials: everything but food, cheapest first.
    pub const MATERIALS: [ResourceKind; 4] = [
        ResourceKind::Wood,
        ResourceKind::Stone,
        ResourceKind::Clay,
        ResourceKind::Gold,
    ];

    /// Ledger index of this kind.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The kind's value.
    ///
    /// This is both the gathering divisor (pips per unit) and the victory
    /// points a unit is worth when spent on a building.
    #[must_use]
    pub const fn value(self) -> u32 {
        match self {
            ResourceKind::Food => 2,
            ResourceKind::Wood => 3,
            ResourceKind::Stone => 4,
            ResourceKind::Clay => 5,
            ResourceKind::Gold => 6,
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ResourceKind::Food => "food",
            ResourceKind::Wood => "wood",
            ResourceKind::Stone => "stone",
            ResourceKind::Clay => "clay",
            ResourceKind::Gold => "gold",
        };
        f.write_str(name)
    }
}

/// Non-negative resource quantities keyed by kind.
///
/// ```
/// use stone_age::core::{ResourceKind, Resources};
///
/// let mut wallet = Resources::new().with(ResourceKind::Wood, 3);
/// assert!(wallet.try_spend(&Resources::new().with(ResourceKind::Wood, 4)).is_err());
/// assert_eq!(wallet[ResourceKind::Wood], 3);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resources([u32; 5]);

/// Returned by [`Resources::try_spend`] when a debit would overdraw a kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Overdraw {
    /// First kind that would go negative.
    pub kind: ResourceKind,
    /// Amount requested for that kind.
    pub requested: u32,
    /// Amount actually held.
    pub held: u32,
}

impl Resources {
    /// An empty ledger.
    #[must_use]
    pub const fn new() -> Self {
        Self([0; 5])
    }

    /// Builder-style setter.
    #[must_use]
    pub fn with(mut self, kind: ResourceKind, amount: u32) -> Self {
        self.0[kind.index()] = amount;
        self
    }

    /// Build a ledger from `(kind, amount)` pairs; repeated kinds accumulate.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (ResourceKind, u32)>) -> Self {
        let mut resources = Self::new();
        for (kind, amount) in pairs {
            resources.add(kind, amount);
        }
        resources
    }

    /// Amount held of `kind`.
    #[must_use]
    pub fn get(&self, kind: ResourceKind) -> u32 {
        self.0[kind.index()]
    }

    /// Credit `amount` of `kind`.
    pub fn add(&mut self, kind: ResourceKind, amount: u32) {
        self.0[kind.index()] += amount;
    }

    /// Credit every entry of `other`.
    pub fn add_all(&mut self, other: &Resources) {
        for kind in ResourceKind::ALL {
            self.add(kind, other.get(kind));
        }
    }

    /// Whether every entry of `other` is covered by this ledger.
    #[must_use]
    pub fn contains(&self, other: &Resources) -> bool {
        ResourceKind::ALL
            .iter()
            .all(|&kind| self.get(kind) >= other.get(kind))
    }

    /// Debit every entry of `cost`, or nothing at all.
    pub fn try_spend(&mut self, cost: &Resources) -> Result<(), Overdraw> {
        if let Some(kind) = ResourceKind::ALL
            .into_iter()
            .find(|&kind| self.get(kind) < cost.get(kind))
        {
            return Err(Overdraw {
                kind,
                requested: cost.get(kind),
                held: self.get(kind),
            });
        }
        for kind in ResourceKind::ALL {
            self.0[kind.index()] -= cost.get(kind);
        }
        Ok(())
    }

    /// Debit up to `amount` of `kind`, returning how much was taken.
    pub fn take_up_to(&mut self, kind: ResourceKind, amount: u32) -> u32 {
        let taken = self.get(kind).min(amount);
        self.0[kind.index()] -= taken;
        taken
    }

    /// Sum of all entries.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }

    /// Sum of the material entries (food excluded).
    #[must_use]
    pub fn material_total(&self) -> u32 {
        ResourceKind::MATERIALS.iter().map(|&k| self.get(k)).sum()
    }

    /// Number of material kinds with a non-zero amount.
    #[must_use]
    pub fn material_variety(&self) -> u32 {
        ResourceKind::MATERIALS
            .iter()
            .filter(|&&k| self.get(k) > 0)
            .count() as u32
    }

    /// Victory points these resources are worth when spent on a building.
    #[must_use]
    pub fn building_value(&self) -> u32 {
        ResourceKind::ALL
            .iter()
            .map(|&k| k.value() * self.get(k))
            .sum()
    }

    /// Iterate over `(kind, amount)` in ledger order.
    pub fn iter(&self) -> impl Iterator<Item = (ResourceKind, u32)> + '_ {
        ResourceKind::ALL.into_iter().map(|k| (k, self.get(k)))
    }
}

impl Index<ResourceKind> for Resources {
    type Output = u32;

    fn index(&self, kind: ResourceKind) -> &Self::Output {
        &self.0[kind.index()]
    }
}

impl IndexMut<ResourceKind> for Resources {
    fn index_mut(&mut self, kind: ResourceKind) -> &mut Self::Output {
        &mut self.0[kind.index()]
    }
}
