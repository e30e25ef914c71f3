/// Player statistics that persist across the run.
///
/// Hit points are clamped on every write so `hp` always stays within
/// `[0, max_hp]`; energy is unsigned and debited only after a check.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerState {
    pub hp: u32,
    pub max_hp: u32,
    pub block: u32,
    pub energy: u32,
    pub max_energy: u32,
    pub gold: u32,
    pub level: u32,
    pub exp: u32,
    pub exp_to_next: u32,
    pub max_hand_size: u32,
}

impl PlayerState {
    pub fn new(max_hp: u32, max_energy: u32, max_hand_size: u32, gold: u32) -> Self {
        Self {
            hp: max_hp,
            max_hp,
            block: 0,
            energy: max_energy,
            max_energy,
            gold,
            level: 1,
            exp: 0,
            exp_to_next: exp_to_next(1),
            max_hand_size,
        }
    }

    /// Heals up to `max_hp` and returns the amount actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.hp;
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
        self.hp - before
    }

    /// Removes hp directly, ignoring block.
    pub fn lose_hp(&mut self, amount: u32) {
        self.hp = self.hp.saturating_sub(amount);
    }

    /// Resolves an incoming hit against block and returns the hp lost.
    ///
    /// Block is consumed entirely regardless of how much was needed.
    pub fn absorb_hit(&mut self, damage: u32) -> u32 {
        let through = damage.saturating_sub(self.block);
        self.block = 0;
        let before = self.hp;
        self.lose_hp(through);
        before - self.hp
    }

    pub fn raise_max_hp(&mut self, amount: u32) {
        self.max_hp = self.max_hp.saturating_add(amount);
        self.heal(amount);
    }

    pub fn try_spend_gold(&mut self, amount: u32) -> bool {
        if self.gold < amount {
            return false;
        }
        self.gold -= amount;
        true
    }

    pub fn is_dead(&self) -> bool {
        self.hp == 0
    }
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::new(50, 3, 3, 0)
    }
}

/// EXP needed to advance from `level` to `level + 1`.
pub fn exp_to_next(level: u32) -> u32 {
    let step = level.saturating_sub(1);
    20 + 15 * step + 5 * step * step
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curve_matches_quadratic() {
        assert_eq!(exp_to_next(1), 20);
        assert_eq!(exp_to_next(2), 40);
        assert_eq!(exp_to_next(3), 70);
        assert_eq!(exp_to_next(4), 110);
    }

    #[test]
    fn block_absorbs_then_resets() {
        let mut player = PlayerState::new(50, 3, 3, 0);
        player.block = 5;
        assert_eq!(player.absorb_hit(8), 3);
        assert_eq!(player.hp, 47);
        assert_eq!(player.block, 0);

        player.block = 10;
        assert_eq!(player.absorb_hit(8), 0);
        assert_eq!(player.hp, 47);
    }

    #[test]
    fn hp_stays_in_range() {
        let mut player = PlayerState::new(20, 3, 3, 0);
        player.lose_hp(100);
        assert_eq!(player.hp, 0);
        assert_eq!(player.heal(100), 20);
        assert_eq!(player.hp, 20);
    }

    #[test]
    fn gold_is_not_spent_when_short() {
        let mut player = PlayerState::new(20, 3, 3, 10);
        assert!(!player.try_spend_gold(11));
        assert_eq!(player.gold, 10);
        assert!(player.try_spend_gold(10));
        assert_eq!(player.gold, 0);
    }
}
