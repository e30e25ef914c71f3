//! Equipped and carried equipment.

use crate::env::EquipmentRecord;

/// Equipment in equip order plus the carried backpack.
///
/// Only the prefix of `equipped` whose cumulative slot cost fits
/// `slots_max` is active; anything after the first overflow is inert.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Loadout {
    pub equipped: Vec<EquipmentRecord>,
    pub backpack: Vec<EquipmentRecord>,
    pub slots_max: u32,
}

impl Loadout {
    pub fn new(slots_max: u32) -> Self {
        Self {
            slots_max,
            ..Self::default()
        }
    }

    /// Number of leading equipped items that are active.
    pub fn active_len(&self) -> usize {
        let mut used = 0u32;
        self.equipped
            .iter()
            .take_while(|item| {
                used = used.saturating_add(item.effective_slot_cost());
                used <= self.slots_max
            })
            .count()
    }

    pub fn active(&self) -> &[EquipmentRecord] {
        &self.equipped[..self.active_len()]
    }

    pub fn is_active(&self, index: usize) -> bool {
        index < self.active_len()
    }

    pub fn equip_from_backpack(&mut self, index: usize) -> Option<&EquipmentRecord> {
        if index >= self.backpack.len() {
            return None;
        }
        let item = self.backpack.remove(index);
        self.equipped.push(item);
        self.equipped.last()
    }

    pub fn unequip(&mut self, index: usize) -> Option<&EquipmentRecord> {
        if index >= self.equipped.len() {
            return None;
        }
        let item = self.equipped.remove(index);
        self.backpack.push(item);
        self.backpack.last()
    }
}
