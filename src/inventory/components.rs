//! Inventory data: one recorded weapon choice per tag.

use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeMap;

use crate::weapons::{WeaponCatalog, WeaponDescriptor, WeaponTag};

/// A player's chosen weapon for one tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventorySlotItem {
    pub tag: WeaponTag,
    pub basename: String,
    /// Only meaningful for weapons that can be silenced.
    pub silencer: bool,
}

impl InventorySlotItem {
    pub fn from_descriptor(descriptor: &WeaponDescriptor) -> Self {
        Self {
            tag: descriptor.tag,
            basename: descriptor.basename.clone(),
            silencer: descriptor.silenced,
        }
    }

    /// Basename the player should be holding for this slot.
    ///
    /// Families with a distinct `_silencer` catalog entry resolve to the
    /// variant matching the preference; everything else keeps its basename.
    pub fn target_basename(&self, catalog: &WeaponCatalog) -> String {
        if !catalog.silencer_eligible(&self.basename) {
            return self.basename.clone();
        }

        let variant = if self.silencer {
            catalog.silenced_variant(&self.basename)
        } else {
            catalog.plain_variant(&self.basename)
        };
        variant
            .map(|descriptor| descriptor.basename.clone())
            .unwrap_or_else(|| self.basename.clone())
    }
}

/// Recorded loadout. At most one item per tag; iterates in equip order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    slots: BTreeMap<WeaponTag, InventorySlotItem>,
}

impl Inventory {
    /// Record `item`, replacing the previous choice for its tag.
    pub fn insert(&mut self, item: InventorySlotItem) -> Option<InventorySlotItem> {
        self.slots.insert(item.tag, item)
    }

    pub fn remove(&mut self, tag: WeaponTag) -> Option<InventorySlotItem> {
        self.slots.remove(&tag)
    }

    pub fn get(&self, tag: WeaponTag) -> Option<&InventorySlotItem> {
        self.slots.get(&tag)
    }

    pub fn get_mut(&mut self, tag: WeaponTag) -> Option<&mut InventorySlotItem> {
        self.slots.get_mut(&tag)
    }

    /// Items in equip order (see [`WeaponTag::EQUIP_ORDER`]).
    pub fn iter(&self) -> impl Iterator<Item = &InventorySlotItem> + '_ {
        self.slots.values()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// One random weapon for every tag in the catalog.
    pub fn random<R: Rng + ?Sized>(catalog: &WeaponCatalog, rng: &mut R) -> Self {
        let mut inventory = Self::default();
        for &tag in catalog.tags() {
            let candidates: Vec<&WeaponDescriptor> = catalog.by_tag(tag).collect();
            if let Some(descriptor) = candidates.choose(rng) {
                inventory.insert(InventorySlotItem::from_descriptor(descriptor));
            }
        }
        inventory
    }
}
