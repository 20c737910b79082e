use crate::types::MoveSlot;

use super::config::CooldownPolicy;

/// Remaining lockout per move slot, in ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cooldowns {
    pub basic: u32,
    pub special1: u32,
    pub special2: u32,
}

impl Cooldowns {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: MoveSlot) -> u32 {
        match slot {
            MoveSlot::Basic => self.basic,
            MoveSlot::Special1 => self.special1,
            MoveSlot::Special2 => self.special2,
        }
    }

    pub fn is_ready(&self, slot: MoveSlot) -> bool {
        self.get(slot) == 0
    }

    /// Lock a slot for its configured number of ticks
    pub fn arm(&mut self, slot: MoveSlot, policy: &CooldownPolicy) {
        let ticks = match slot {
            MoveSlot::Basic => policy.basic,
            MoveSlot::Special1 => policy.special1,
            MoveSlot::Special2 => policy.special2,
        };
        *self.slot_mut(slot) = ticks;
    }

    /// Count every slot down by one, stopping at zero
    pub fn tick(&mut self) {
        for slot in MoveSlot::ALL {
            let remaining = self.slot_mut(slot);
            *remaining = remaining.saturating_sub(1);
        }
    }

    fn slot_mut(&mut self, slot: MoveSlot) -> &mut u32 {
        match slot {
            MoveSlot::Basic => &mut self.basic,
            MoveSlot::Special1 => &mut self.special1,
            MoveSlot::Special2 => &mut self.special2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arm_and_tick() {
        let policy = CooldownPolicy::default();
        let mut cd = Cooldowns::new();
        assert!(cd.is_ready(MoveSlot::Special2));

        cd.arm(MoveSlot::Special2, &policy);
        cd.arm(MoveSlot::Basic, &policy);
        assert_eq!(cd.get(MoveSlot::Special2), 8);
        assert_eq!(cd.get(MoveSlot::Basic), 1);

        cd.tick();
        assert_eq!(cd.get(MoveSlot::Special2), 7);
        assert!(cd.is_ready(MoveSlot::Basic));
        assert!(cd.is_ready(MoveSlot::Special1));
    }

    #[test]
    fn test_tick_clamps_at_zero() {
        let mut cd = Cooldowns::new();
        for _ in 0..10 {
            cd.tick();
        }
        assert_eq!(cd, Cooldowns::default());
    }
}
