//! Combat domain: components and the health/shield state machine.

use bevy::prelude::*;

/// Marks an entity as a combat participant
#[derive(Component, Debug)]
pub struct Combatant;

/// Team affiliation to prevent friendly fire
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Team {
    Player,
    Enemy,
}

/// Present while a combatant is dead: movement, weapons and collisions stay off.
#[derive(Component, Debug)]
pub struct Incapacitated;

/// Target that gets back up by itself some time after dying.
#[derive(Component, Debug)]
pub struct Respawn {
    pub delay: f32,
    /// Counts down while dead; `None` while alive
    pub timer: Option<f32>,
}

impl Respawn {
    pub fn after(delay: f32) -> Self {
        Self { delay, timer: None }
    }

    pub fn start(&mut self) {
        self.timer = Some(self.delay);
    }

    /// Returns true once the countdown has elapsed. The timer is cleared.
    pub fn tick(&mut self, dt: f32) -> bool {
        let Some(remaining) = self.timer.as_mut() else {
            return false;
        };
        *remaining -= dt;
        if *remaining <= 0.0 {
            self.timer = None;
            true
        } else {
            false
        }
    }
}

/// Coarse state of a combatant's vitals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VitalState {
    ShieldUp,
    ShieldBroken,
    Dead,
}

/// Which pool of a [`Health`] a query is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VitalPool {
    Health,
    Shield,
}

/// Why a health mutation was not applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageRejection {
    /// Amount was zero, negative or not a number
    InvalidAmount,
    /// Target is already dead
    AlreadyDead,
}

impl std::fmt::Display for DamageRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DamageRejection::InvalidAmount => write!(f, "amount must be positive"),
            DamageRejection::AlreadyDead => write!(f, "target is already dead"),
        }
    }
}

/// What a successful hit did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DamageOutcome {
    /// Shield took the hit and still holds
    ShieldAbsorbed { absorbed: f32 },
    /// Shield took the hit and dropped to zero
    ShieldBroken { absorbed: f32 },
    /// Health took the hit and the combatant survives
    HealthLost { lost: f32 },
    /// Health reached zero
    Died { lost: f32 },
}

impl DamageOutcome {
    pub fn is_death(&self) -> bool {
        matches!(self, DamageOutcome::Died { .. })
    }
}

fn check_amount(amount: f32) -> Result<(), DamageRejection> {
    if amount.is_finite() && amount > 0.0 {
        Ok(())
    } else {
        Err(DamageRejection::InvalidAmount)
    }
}

/// Health and shield for damageable entities.
///
/// Incoming damage drains the shield first. A hit that lands on the shield
/// is fully spent there even if it exceeds what the shield had left; only the
/// following hits reach health once the shield is broken.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Health {
    pub current: f32,
    pub max: f32,
    pub shield: f32,
    pub max_shield: f32,
    pub shield_broken: bool,
    pub alive: bool,
}

impl Health {
    pub fn new(max: f32, max_shield: f32) -> Self {
        let max = max.max(0.0);
        let max_shield = max_shield.max(0.0);
        Self {
            current: max,
            max,
            shield: max_shield,
            max_shield,
            shield_broken: max_shield <= 0.0,
            alive: true,
        }
    }

    /// Health without any shield pool
    pub fn unshielded(max: f32) -> Self {
        Self::new(max, 0.0)
    }

    pub fn apply_damage(&mut self, amount: f32) -> Result<DamageOutcome, DamageRejection> {
        if !self.alive {
            return Err(DamageRejection::AlreadyDead);
        }
        check_amount(amount)?;

        if !self.shield_broken {
            let before = self.shield;
            self.shield = (self.shield - amount).clamp(0.0, self.max_shield);
            let absorbed = before - self.shield;
            if self.shield <= 0.0 {
                self.shield_broken = true;
                return Ok(DamageOutcome::ShieldBroken { absorbed });
            }
            return Ok(DamageOutcome::ShieldAbsorbed { absorbed });
        }

        let before = self.current;
        self.current = (self.current - amount).clamp(0.0, self.max);
        let lost = before - self.current;
        if self.current <= 0.0 {
            self.die();
            return Ok(DamageOutcome::Died { lost });
        }
        Ok(DamageOutcome::HealthLost { lost })
    }

    /// Returns the amount actually healed.
    pub fn heal(&mut self, amount: f32) -> Result<f32, DamageRejection> {
        if !self.alive {
            return Err(DamageRejection::AlreadyDead);
        }
        check_amount(amount)?;

        let before = self.current;
        self.current = (self.current + amount).min(self.max);
        Ok(self.current - before)
    }

    /// Returns the amount of shield actually restored.
    pub fn restore_shield(&mut self, amount: f32) -> Result<f32, DamageRejection> {
        if !self.alive {
            return Err(DamageRejection::AlreadyDead);
        }
        check_amount(amount)?;

        let before = self.shield;
        self.shield = (self.shield + amount).min(self.max_shield);
        if self.shield > 0.0 {
            self.shield_broken = false;
        }
        Ok(self.shield - before)
    }

    pub fn die(&mut self) {
        self.current = 0.0;
        self.alive = false;
    }

    /// Back to full health and full shield, whatever state we were in.
    pub fn revive(&mut self) {
        self.current = self.max;
        self.shield = self.max_shield;
        // Unshielded combatants have nothing to hold up
        self.shield_broken = self.max_shield <= 0.0;
        self.alive = true;
    }

    pub fn is_dead(&self) -> bool {
        !self.alive
    }

    pub fn state(&self) -> VitalState {
        if !self.alive {
            VitalState::Dead
        } else if self.shield_broken {
            VitalState::ShieldBroken
        } else {
            VitalState::ShieldUp
        }
    }

    pub fn is_full(&self, pool: VitalPool) -> bool {
        match pool {
            VitalPool::Health => self.current >= self.max,
            VitalPool::Shield => self.shield >= self.max_shield,
        }
    }

    pub fn percent(&self) -> f32 {
        if self.max <= 0.0 {
            0.0
        } else {
            self.current / self.max
        }
    }

    pub fn shield_percent(&self) -> f32 {
        if self.max_shield <= 0.0 {
            0.0
        } else {
            self.shield / self.max_shield
        }
    }
}
