//! Combat domain: the equipped ranged weapon and its projectiles.

use bevy::prelude::*;

use crate::content::WeaponDefaults;

/// Why a trigger pull did not produce a shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeaponRejection {
    Empty,
    CoolingDown,
}

impl std::fmt::Display for WeaponRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WeaponRejection::Empty => write!(f, "magazine is empty"),
            WeaponRejection::CoolingDown => write!(f, "weapon is cooling down"),
        }
    }
}

#[derive(Component, Debug, Clone)]
pub struct Weapon {
    pub name: String,
    pub magazine_size: u32,
    pub ammo: u32,
    pub fire_cooldown: f32,
    pub cooldown_timer: f32,
    pub projectile_speed: f32,
    pub projectile_damage: f32,
    pub projectile_lifetime: f32,
}

impl Weapon {
    /// Build a weapon from tuning, with a full magazine.
    pub fn equip(defaults: &WeaponDefaults) -> Self {
        Self {
            name: defaults.name.clone(),
            magazine_size: defaults.magazine_size,
            ammo: defaults.magazine_size,
            fire_cooldown: defaults.fire_cooldown,
            cooldown_timer: 0.0,
            projectile_speed: defaults.projectile_speed,
            projectile_damage: defaults.projectile_damage,
            projectile_lifetime: defaults.projectile_lifetime,
        }
    }

    /// Spend one round. Returns the ammo left.
    pub fn try_fire(&mut self) -> Result<u32, WeaponRejection> {
        if self.cooldown_timer > 0.0 {
            return Err(WeaponRejection::CoolingDown);
        }
        if self.ammo == 0 {
            return Err(WeaponRejection::Empty);
        }
        self.ammo -= 1;
        self.cooldown_timer = self.fire_cooldown;
        Ok(self.ammo)
    }

    pub fn reload(&mut self) {
        self.ammo = self.magazine_size;
    }

    pub fn tick(&mut self, dt: f32) {
        if self.cooldown_timer > 0.0 {
            self.cooldown_timer = (self.cooldown_timer - dt).max(0.0);
        }
    }
}

/// A shot in flight
#[derive(Component, Debug)]
pub struct Projectile {
    pub damage: f32,
    pub owner: Entity,
}

/// Seconds until a projectile despawns on its own
#[derive(Component, Debug)]
pub struct ProjectileLifetime(pub f32);
