//! Immutable weapon metadata keyed by basename and by tag.

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use super::data::WeaponEntry;
use super::error::CatalogError;

/// Basename suffix of the silenced variant of a weapon family.
pub const SILENCER_SUFFIX: &str = "_silencer";

/// Weapon category, used as the inventory slot key.
///
/// The declaration order is the equip order: secondary before primary so the
/// primary weapon ends up in hand, grenade-class items last.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WeaponTag {
    Secondary,
    Primary,
    Melee,
    Grenade,
}

impl WeaponTag {
    pub const EQUIP_ORDER: [WeaponTag; 4] = [
        WeaponTag::Secondary,
        WeaponTag::Primary,
        WeaponTag::Melee,
        WeaponTag::Grenade,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            WeaponTag::Primary => "primary",
            WeaponTag::Secondary => "secondary",
            WeaponTag::Melee => "melee",
            WeaponTag::Grenade => "grenade",
        }
    }
}

impl fmt::Display for WeaponTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WeaponTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "primary" => Ok(WeaponTag::Primary),
            "secondary" => Ok(WeaponTag::Secondary),
            "melee" => Ok(WeaponTag::Melee),
            "grenade" => Ok(WeaponTag::Grenade),
            other => Err(other.to_string()),
        }
    }
}

/// Everything the core knows about one weapon.
#[derive(Debug, Clone, PartialEq)]
pub struct WeaponDescriptor {
    pub basename: String,
    /// Engine name, e.g. `weapon_ak47`.
    pub full_name: String,
    pub display_name: String,
    pub tag: WeaponTag,
    pub clip_size: u32,
    pub max_ammo: u32,
    /// This entry is the `_silencer` variant of its family.
    pub silenced: bool,
    /// A silencer preference is meaningful for this weapon.
    pub can_silence: bool,
    /// The silencer is toggled on the weapon entity itself.
    pub silencer_attachment: bool,
}

struct CatalogData {
    prefix: String,
    weapons: Vec<WeaponDescriptor>,
    index: HashMap<String, usize>,
    tags: Vec<WeaponTag>,
}

/// Weapon catalog resource. Cheap to clone; never mutated after load.
#[derive(Resource, Clone)]
pub struct WeaponCatalog(Arc<CatalogData>);

impl WeaponCatalog {
    /// Build the catalog from parsed entries, keeping their order.
    pub fn from_entries(prefix: &str, entries: Vec<WeaponEntry>) -> Result<Self, CatalogError> {
        let mut index = HashMap::new();
        for (i, entry) in entries.iter().enumerate() {
            if index.insert(entry.basename.clone(), i).is_some() {
                return Err(CatalogError::DuplicateWeapon(entry.basename.clone()));
            }
        }

        let has_pair = |basename: &str| {
            let family = family_of(basename);
            index.contains_key(family) && index.contains_key(&format!("{}{}", family, SILENCER_SUFFIX))
        };

        let mut tags = Vec::new();
        let weapons = entries
            .iter()
            .map(|entry| {
                if !tags.contains(&entry.tag) {
                    tags.push(entry.tag);
                }
                WeaponDescriptor {
                    basename: entry.basename.clone(),
                    full_name: format!("{}{}", prefix, entry.basename),
                    display_name: entry.display_name.clone(),
                    tag: entry.tag,
                    clip_size: entry.clip_size,
                    max_ammo: entry.max_ammo,
                    silenced: entry.basename.ends_with(SILENCER_SUFFIX),
                    can_silence: entry.silencer_attachment || has_pair(&entry.basename),
                    silencer_attachment: entry.silencer_attachment,
                }
            })
            .collect();

        Ok(Self(Arc::new(CatalogData {
            prefix: prefix.to_string(),
            weapons,
            index,
            tags,
        })))
    }

    /// Parse an INI weapons file body and build the catalog.
    pub fn from_ini_str(prefix: &str, contents: &str) -> Result<Self, CatalogError> {
        Self::from_entries(prefix, super::data::parse_weapons_ini(contents)?)
    }

    pub fn get(&self, basename: &str) -> Option<&WeaponDescriptor> {
        self.0.index.get(basename).map(|&i| &self.0.weapons[i])
    }

    /// Look a weapon up by basename or by full engine name.
    pub fn lookup(&self, name: &str) -> Option<&WeaponDescriptor> {
        self.get(self.basename_of(name))
    }

    /// All weapons of `tag`, in catalog load order.
    pub fn by_tag(&self, tag: WeaponTag) -> impl Iterator<Item = &WeaponDescriptor> + '_ {
        self.0.weapons.iter().filter(move |weapon| weapon.tag == tag)
    }

    /// Tags that have at least one weapon, in load order.
    pub fn tags(&self) -> &[WeaponTag] {
        &self.0.tags
    }

    pub fn iter(&self) -> impl Iterator<Item = &WeaponDescriptor> + '_ {
        self.0.weapons.iter()
    }

    pub fn prefix(&self) -> &str {
        &self.0.prefix
    }

    /// Add the engine prefix unless the name already carries it.
    pub fn resolve_full_name(&self, basename: &str) -> String {
        if basename.starts_with(&self.0.prefix) {
            basename.to_string()
        } else {
            format!("{}{}", self.0.prefix, basename)
        }
    }

    /// Strip the engine prefix, if present.
    pub fn basename_of<'a>(&self, full_name: &'a str) -> &'a str {
        full_name.strip_prefix(self.0.prefix.as_str()).unwrap_or(full_name)
    }

    /// True only if both the plain and the silenced variant are in the catalog.
    pub fn silencer_eligible(&self, basename: &str) -> bool {
        let family = family_of(self.basename_of(basename));
        self.get(family).is_some() && self.silenced_variant(family).is_some()
    }

    pub fn silenced_variant(&self, basename: &str) -> Option<&WeaponDescriptor> {
        let family = family_of(self.basename_of(basename));
        self.get(&format!("{}{}", family, SILENCER_SUFFIX))
    }

    pub fn plain_variant(&self, basename: &str) -> Option<&WeaponDescriptor> {
        self.get(family_of(self.basename_of(basename)))
    }

    pub fn len(&self) -> usize {
        self.0.weapons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.weapons.is_empty()
    }
}

/// Basename of the plain variant of a weapon family.
pub fn family_of(basename: &str) -> &str {
    basename.strip_suffix(SILENCER_SUFFIX).unwrap_or(basename)
}
