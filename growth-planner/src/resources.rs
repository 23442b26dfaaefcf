//! Resource keys and the material shopping list produced by aggregation.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Category a procurable resource belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ResourceCategory {
    Currency,
    Item,
    Equipment,
}

impl ResourceCategory {
    pub const ALL: [Self; 3] = [Self::Currency, Self::Item, Self::Equipment];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Currency => "Currency",
            Self::Item => "Item",
            Self::Equipment => "Equipment",
        }
    }
}

impl fmt::Display for ResourceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Errors raised when parsing a `"Category_id"` key.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResourceKeyError {
    #[error("resource key `{0}` is missing the `_` separator")]
    MissingSeparator(String),
    #[error("resource key `{0}` has an unknown category")]
    UnknownCategory(String),
    #[error("resource key `{0}` has a non-numeric id")]
    InvalidId(String),
}

/// Identity of a procurable resource, serialized as `"Category_id"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ResourceKey {
    pub category: ResourceCategory,
    pub id: u32,
}

impl ResourceKey {
    #[must_use]
    pub const fn new(category: ResourceCategory, id: u32) -> Self {
        Self { category, id }
    }

    #[must_use]
    pub const fn currency(id: u32) -> Self {
        Self::new(ResourceCategory::Currency, id)
    }

    #[must_use]
    pub const fn item(id: u32) -> Self {
        Self::new(ResourceCategory::Item, id)
    }

    #[must_use]
    pub const fn equipment(id: u32) -> Self {
        Self::new(ResourceCategory::Equipment, id)
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.category, self.id)
    }
}

impl FromStr for ResourceKey {
    type Err = ResourceKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((category, id)) = s.split_once('_') else {
            return Err(ResourceKeyError::MissingSeparator(s.to_string()));
        };
        let category = ResourceCategory::ALL
            .into_iter()
            .find(|candidate| candidate.key() == category)
            .ok_or_else(|| ResourceKeyError::UnknownCategory(s.to_string()))?;
        let id = id
            .parse::<u32>()
            .map_err(|_| ResourceKeyError::InvalidId(s.to_string()))?;
        Ok(Self { category, id })
    }
}

impl TryFrom<String> for ResourceKey {
    type Error = ResourceKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ResourceKey> for String {
    fn from(key: ResourceKey) -> Self {
        key.to_string()
    }
}

/// Owned stock, keyed the same way as [`Needs`].
pub type Inventory = BTreeMap<ResourceKey, u64>;

/// Required quantity per resource.
///
/// Entries appear on the first non-zero demand and only ever grow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Needs(BTreeMap<ResourceKey, u64>);

impl Needs {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add demand for a resource. Zero amounts leave the list untouched.
    pub fn add(&mut self, key: ResourceKey, amount: u64) {
        if amount == 0 {
            return;
        }
        let entry = self.0.entry(key).or_insert(0);
        *entry = entry.saturating_add(amount);
    }

    /// Quantity required for `key`, 0 when absent.
    #[must_use]
    pub fn get(&self, key: ResourceKey) -> u64 {
        self.0.get(&key).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ResourceKey, u64)> + '_ {
        self.0.iter().map(|(key, qty)| (*key, *qty))
    }

    /// Entries of a single category, in id order.
    pub fn by_category(
        &self,
        category: ResourceCategory,
    ) -> impl Iterator<Item = (ResourceKey, u64)> + '_ {
        self.iter().filter(move |(key, _)| key.category == category)
    }

    /// Fold another list into this one.
    pub fn merge(&mut self, other: &Self) {
        for (key, qty) in other.iter() {
            self.add(key, qty);
        }
    }

    /// What is still missing once `owned` stock is spent.
    #[must_use]
    pub fn shortfall(&self, owned: &Inventory) -> Self {
        let mut missing = Self::new();
        for (key, qty) in self.iter() {
            let have = owned.get(&key).copied().unwrap_or(0);
            missing.add(key, qty.saturating_sub(have));
        }
        missing
    }
}

impl<'a> IntoIterator for &'a Needs {
    type Item = (&'a ResourceKey, &'a u64);
    type IntoIter = std::collections::btree_map::Iter<'a, ResourceKey, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(ResourceKey, u64)> for Needs {
    fn from_iter<I: IntoIterator<Item = (ResourceKey, u64)>>(iter: I) -> Self {
        let mut needs = Self::new();
        for (key, qty) in iter {
            needs.add(key, qty);
        }
        needs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_display_and_parse_agree() {
        let key = ResourceKey::currency(1);
        assert_eq!(key.to_string(), "Currency_1");
        assert_eq!(
            "Equipment_3004".parse::<ResourceKey>().unwrap(),
            ResourceKey::equipment(3004)
        );
    }

    #[test]
    fn key_parse_rejects_bad_shapes() {
        assert_eq!(
            "Currency1".parse::<ResourceKey>(),
            Err(ResourceKeyError::MissingSeparator("Currency1".to_string()))
        );
        assert_eq!(
            "Gift_5".parse::<ResourceKey>(),
            Err(ResourceKeyError::UnknownCategory("Gift_5".to_string()))
        );
        assert_eq!(
            "Item_x".parse::<ResourceKey>(),
            Err(ResourceKeyError::InvalidId("Item_x".to_string()))
        );
    }

    #[test]
    fn keys_order_by_category_then_id() {
        let mut keys = vec![
            ResourceKey::equipment(1),
            ResourceKey::item(9),
            ResourceKey::currency(23),
            ResourceKey::item(2),
        ];
        keys.sort();
        assert_eq!(
            keys,
            vec![
                ResourceKey::currency(23),
                ResourceKey::item(2),
                ResourceKey::item(9),
                ResourceKey::equipment(1),
            ]
        );
    }

    #[test]
    fn needs_skip_zero_and_accumulate() {
        let mut needs = Needs::new();
        needs.add(ResourceKey::item(10), 0);
        assert!(needs.is_empty());
        needs.add(ResourceKey::item(10), 3);
        needs.add(ResourceKey::item(10), 4);
        assert_eq!(needs.get(ResourceKey::item(10)), 7);
        assert_eq!(needs.get(ResourceKey::item(11)), 0);
    }

    #[test]
    fn needs_serialize_with_string_keys() {
        let needs: Needs = [(ResourceKey::currency(1), 125), (ResourceKey::item(10), 3)]
            .into_iter()
            .collect();
        let json = serde_json::to_string(&needs).unwrap();
        assert_eq!(json, r#"{"Currency_1":125,"Item_10":3}"#);
        let back: Needs = serde_json::from_str(&json).unwrap();
        assert_eq!(back, needs);
    }

    #[test]
    fn shortfall_drops_covered_entries() {
        let needs: Needs = [(ResourceKey::currency(1), 100), (ResourceKey::item(10), 3)]
            .into_iter()
            .collect();
        let owned = Inventory::from([(ResourceKey::currency(1), 150), (ResourceKey::item(10), 1)]);
        let missing = needs.shortfall(&owned);
        assert_eq!(missing.len(), 1);
        assert_eq!(missing.get(ResourceKey::item(10)), 2);
    }

    #[test]
    fn by_category_filters() {
        let needs: Needs = [
            (ResourceKey::currency(1), 5),
            (ResourceKey::equipment(2), 1),
            (ResourceKey::equipment(3), 2),
        ]
        .into_iter()
        .collect();
        assert_eq!(needs.by_category(ResourceCategory::Equipment).count(), 2);
        assert_eq!(needs.by_category(ResourceCategory::Item).count(), 0);
    }
}
