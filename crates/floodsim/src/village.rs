//! Totems and homes: the external bodies the flood interacts with.
//!
//! Both live in render-space coordinates; forces convert through
//! `FieldMapping::world_to_field` at application time.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::constants::{HOME_STARTING_ENERGY, MAX_TOTEMS};
use crate::serde_utils::vec3_serde;

/// A placed totem. Immovable; repels nearby particles.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct Totem {
    #[serde(with = "vec3_serde")]
    pub position: Vec3,
}

/// Fixed-capacity totem slots with an explicit active cursor. Slots past
/// the cursor are logically absent even though storage is preallocated.
#[derive(Clone, Copy, Debug, Default)]
pub struct Totems {
    slots: [Totem; MAX_TOTEMS],
    active: usize,
}

impl Totems {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a totem in the next free slot. Returns false when all slots
    /// are taken.
    pub fn place(&mut self, position: Vec3) -> bool {
        if self.active >= MAX_TOTEMS {
            return false;
        }
        self.slots[self.active] = Totem { position };
        self.active += 1;
        true
    }

    /// Deactivate every totem (slot storage is retained).
    pub fn clear(&mut self) {
        self.active = 0;
    }

    /// The currently active totems.
    pub fn active(&self) -> &[Totem] {
        &self.slots[..self.active]
    }

    pub fn active_count(&self) -> usize {
        self.active
    }

    pub fn free_slots(&self) -> usize {
        MAX_TOTEMS - self.active
    }
}

/// A home with an energy pool the flood drains.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Home {
    #[serde(with = "vec3_serde")]
    pub position: Vec3,
    /// Remaining energy. Unclamped; damage may drive it negative.
    pub energy: f32,
}

/// The homes under protection plus the health bookkeeping derived from
/// their energy pools.
#[derive(Clone, Debug, Default)]
pub struct Homes {
    list: Vec<Home>,
    /// Σ energy right after spawn; denominator of the health percentage.
    starting_energy: f32,
}

impl Homes {
    /// Spawn homes from scene markers: (node name, world translation)
    /// pairs, keeping those whose name starts with `prefix`. The set is
    /// fixed afterward.
    pub fn spawn_from_markers<'a, I>(markers: I, prefix: &str) -> Self
    where
        I: IntoIterator<Item = (&'a str, Vec3)>,
    {
        let list: Vec<Home> = markers
            .into_iter()
            .filter(|(name, _)| name.starts_with(prefix))
            .map(|(_, position)| Home {
                position,
                energy: HOME_STARTING_ENERGY,
            })
            .collect();

        log::info!("home count: {}", list.len());

        let mut homes = Self {
            list,
            starting_energy: 0.0,
        };
        homes.reset_energy();
        homes.starting_energy = homes.total_energy();
        homes
    }

    /// Restore every home to the starting energy (day start).
    pub fn reset_energy(&mut self) {
        for home in &mut self.list {
            home.energy = HOME_STARTING_ENERGY;
        }
    }

    /// Sum of the remaining energy across all homes.
    pub fn total_energy(&self) -> f32 {
        self.list.iter().map(|h| h.energy).sum()
    }

    /// Remaining energy as a percentage of the spawn-time total, clamped
    /// at zero below. 100 when no homes were spawned.
    pub fn health(&self) -> f32 {
        if self.starting_energy <= 0.0 {
            return 100.0;
        }
        (self.total_energy() * 100.0 / self.starting_energy).max(0.0)
    }

    pub fn starting_energy(&self) -> f32 {
        self.starting_energy
    }

    pub fn iter(&self) -> impl Iterator<Item = &Home> {
        self.list.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Home> {
        self.list.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_homes() -> Homes {
        Homes::spawn_from_markers(
            vec![
                ("maison_01", Vec3::new(10.0, 5.0, -3.0)),
                ("rocher_big", Vec3::ZERO),
                ("maison_02", Vec3::new(-8.0, 4.0, 12.0)),
                ("maison_03", Vec3::new(0.0, 6.0, 20.0)),
                ("arbre", Vec3::ONE),
            ],
            "maison",
        )
    }

    #[test]
    fn test_spawn_filters_by_prefix() {
        let homes = three_homes();
        assert_eq!(homes.len(), 3);
    }

    #[test]
    fn test_starting_energy_denominator() {
        let homes = three_homes();
        assert!((homes.starting_energy() - 3.0 * HOME_STARTING_ENERGY).abs() < 1e-6);
    }

    #[test]
    fn test_day_reset_restores_energy() {
        let mut homes = three_homes();
        for home in homes.iter_mut() {
            home.energy -= 7.5;
        }
        homes.reset_energy();
        for home in homes.iter() {
            assert_eq!(home.energy, HOME_STARTING_ENERGY);
        }
        assert!((homes.total_energy() - homes.starting_energy()).abs() < 1e-6);
    }

    #[test]
    fn test_health_full_and_half() {
        let mut homes = three_homes();
        assert!((homes.health() - 100.0).abs() < 1e-4);

        for home in homes.iter_mut() {
            home.energy = HOME_STARTING_ENERGY / 2.0;
        }
        assert!((homes.health() - 50.0).abs() < 1e-4);
    }

    #[test]
    fn test_health_clamps_at_zero_but_energy_does_not() {
        let mut homes = three_homes();
        for home in homes.iter_mut() {
            home.energy = -5.0;
        }
        assert_eq!(homes.health(), 0.0);
        assert!(homes.total_energy() < 0.0);
    }

    #[test]
    fn test_health_with_no_homes() {
        let homes = Homes::spawn_from_markers(std::iter::empty(), "maison");
        assert_eq!(homes.health(), 100.0);
    }

    #[test]
    fn test_totem_capacity() {
        let mut totems = Totems::new();
        assert!(totems.place(Vec3::ZERO));
        assert!(totems.place(Vec3::X));
        assert!(totems.place(Vec3::Y));
        assert!(!totems.place(Vec3::Z));
        assert_eq!(totems.active_count(), MAX_TOTEMS);
        assert_eq!(totems.free_slots(), 0);
    }

    #[test]
    fn test_totem_clear_resets_cursor() {
        let mut totems = Totems::new();
        totems.place(Vec3::ONE);
        totems.place(Vec3::X);
        totems.clear();
        assert_eq!(totems.active_count(), 0);
        assert!(totems.active().is_empty());
        assert!(totems.place(Vec3::Z));
        assert_eq!(totems.active().len(), 1);
    }
}
