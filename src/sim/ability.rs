//! Character ability and power-up timers
//!
//! Both are absolute deadlines compared against the clock sampled at the
//! start of each tick. A new trigger overwrites the deadline, so nothing
//! needs explicit cancellation.

use serde::{Deserialize, Serialize};

use crate::characters::{Ability, Character};
use crate::consts::*;

/// Per-run ability state.
///
/// `Idle(ready)` -> `Active` -> `Idle(cooldown)` -> `Idle(ready)`.
/// The cooldown runs from activation, not from the end of the effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityState {
    pub active: bool,
    pub ready: bool,
    pub last_use_ms: u64,
    pub active_until_ms: u64,
}

impl Default for AbilityState {
    fn default() -> Self {
        Self {
            active: false,
            ready: true,
            last_use_ms: 0,
            active_until_ms: 0,
        }
    }
}

impl AbilityState {
    /// Activate if the character has an ability and it is off cooldown
    pub fn try_activate(&mut self, ability: Option<&Ability>, now_ms: u64) -> bool {
        let Some(ability) = ability else {
            return false;
        };
        if !self.ready {
            return false;
        }
        self.active = true;
        self.ready = false;
        self.last_use_ms = now_ms;
        self.active_until_ms = now_ms.saturating_add(ability.duration_ms);
        true
    }

    /// Expire the effect and recharge the cooldown
    pub fn update(&mut self, ability: Option<&Ability>, now_ms: u64) {
        if self.active && now_ms >= self.active_until_ms {
            self.active = false;
            log::debug!("Ability expired at {}ms", now_ms);
        }
        if let Some(ability) = ability {
            if !self.ready && now_ms.saturating_sub(self.last_use_ms) >= ability.cooldown_ms {
                self.ready = true;
                log::debug!("Ability ready again at {}ms", now_ms);
            }
        }
    }

    /// Cooldown fill for HUD meters (1.0 = ready)
    pub fn cooldown_progress(&self, ability: Option<&Ability>, now_ms: u64) -> f32 {
        match ability {
            None => 0.0,
            Some(_) if self.ready => 1.0,
            Some(a) if a.cooldown_ms == 0 => 1.0,
            Some(a) => {
                let elapsed = now_ms.saturating_sub(self.last_use_ms) as f32;
                (elapsed / a.cooldown_ms as f32).min(1.0)
            }
        }
    }
}

/// Timed jump boost from power-ups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BoostState {
    pub expires_at_ms: Option<u64>,
}

impl BoostState {
    pub fn activate(&mut self, now_ms: u64) {
        self.expires_at_ms = Some(now_ms.saturating_add(BOOST_DURATION_MS));
    }

    /// Clear once the clock reaches the expiry
    pub fn update(&mut self, now_ms: u64) {
        if self.expires_at_ms.is_some_and(|expiry| now_ms >= expiry) {
            self.expires_at_ms = None;
            log::debug!("Boost expired");
        }
    }

    pub fn is_active(&self) -> bool {
        self.expires_at_ms.is_some()
    }
}

/// Vertical velocity a jump sets, given the modifiers in effect.
///
/// Slow fall takes precedence over boost.
pub fn jump_velocity(character: &Character, ability_active: bool, boost_active: bool) -> f32 {
    if ability_active && character.has_slow_fall {
        JUMP_IMPULSE * SLOW_FALL_JUMP_SCALE
    } else if boost_active {
        JUMP_IMPULSE * BOOST_JUMP_MULTIPLIER
    } else {
        JUMP_IMPULSE
    }
}

/// Gravity applied to the player this tick
pub fn player_gravity(character: &Character, ability_active: bool) -> f32 {
    if ability_active && character.has_slow_fall {
        GRAVITY * SLOW_FALL_GRAVITY_SCALE
    } else {
        GRAVITY
    }
}
