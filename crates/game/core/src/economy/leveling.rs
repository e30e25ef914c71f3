//! EXP curve, level-up bucket selection and candidate rolls.

use crate::config::{BucketWeights, GameConfig};
use crate::env::{BlessingRecord, ContentOracle, GeneratorState};
use crate::state::{LevelUpBucket, PendingLevelUp, RunState, exp_to_next};

impl BucketWeights {
    fn table(&self) -> [(LevelUpBucket, u32); 8] {
        [
            (LevelUpBucket::MaxHp, self.max_hp),
            (LevelUpBucket::MaxEnergy, self.max_energy),
            (LevelUpBucket::MaxHand, self.max_hand),
            (LevelUpBucket::Cards, self.cards),
            (LevelUpBucket::Blessing, self.blessing),
            (LevelUpBucket::Remove, self.remove),
            (LevelUpBucket::Upgrade, self.upgrade),
            (LevelUpBucket::Gold, self.gold),
        ]
    }
}

/// Picks a bucket with a single float draw scaled by the total weight.
pub fn roll_bucket(rng: &mut GeneratorState, weights: &BucketWeights) -> LevelUpBucket {
    let table = weights.table();
    let total: u32 = table.iter().map(|(_, weight)| weight).sum();
    let mut roll = rng.draw_float() * f64::from(total);
    for (bucket, weight) in table {
        let weight = f64::from(weight);
        if roll < weight {
            return bucket;
        }
        roll -= weight;
    }
    LevelUpBucket::Gold
}

/// Two distinct blessings the player does not own yet, from a shuffled table.
pub fn roll_blessing_pair(
    rng: &mut GeneratorState,
    content: &dyn ContentOracle,
    owned: &[BlessingRecord],
) -> Vec<BlessingRecord> {
    let mut pool: Vec<BlessingRecord> = content
        .blessings()
        .iter()
        .filter(|blessing| !owned.iter().any(|held| held.id == blessing.id))
        .cloned()
        .collect();
    rng.shuffle_in_place(&mut pool);
    pool.truncate(2);
    pool
}

/// Rolls the bucket and, for card or blessing buckets, two candidates.
pub fn roll_level_up(
    rng: &mut GeneratorState,
    content: &dyn ContentOracle,
    config: &GameConfig,
    owned: &[BlessingRecord],
) -> PendingLevelUp {
    let bucket = roll_bucket(rng, &config.leveling.buckets);
    let mut pending = PendingLevelUp::new(bucket);
    match bucket {
        LevelUpBucket::Cards => {
            let mut pool = content.reward_pool().to_vec();
            rng.shuffle_in_place(&mut pool);
            pool.truncate(2);
            pending.card_choices = pool;
        }
        LevelUpBucket::Blessing => {
            pending.blessing_choices = roll_blessing_pair(rng, content, owned);
        }
        _ => {}
    }
    pending
}

/// Adds EXP, advancing levels while thresholds are crossed.
///
/// The first level gained while no choice is open becomes the pending choice;
/// every other level gained logs a queued line. Returns the number of levels
/// gained.
pub fn grant_exp(
    state: &mut RunState,
    rng: &mut GeneratorState,
    content: &dyn ContentOracle,
    config: &GameConfig,
    amount: u32,
) -> u32 {
    let player = &mut state.player;
    player.exp = player.exp.saturating_add(amount);

    let mut gained = 0;
    while player.exp >= player.exp_to_next {
        player.exp -= player.exp_to_next;
        player.level += 1;
        player.exp_to_next = exp_to_next(player.level);
        gained += 1;
    }
    let level = player.level;

    state.log(format!("+{amount} EXP"));
    if gained == 0 {
        return 0;
    }

    state.log(format!("Level up! Now level {level}"));
    for _ in 0..gained {
        if state.level_up_pending() {
            state.log("LevelUp queued (multiple levels).");
            continue;
        }
        let pending = roll_level_up(rng, content, config, &state.blessings);
        state.log(format!("Level-up reward: {}", pending.bucket));
        state.level_up = Some(pending);
    }
    gained
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{fixture_content, fresh_run};

    #[test]
    fn bucket_roll_respects_zero_weights() {
        let only_gold = BucketWeights {
            max_hp: 0,
            max_energy: 0,
            max_hand: 0,
            cards: 0,
            blessing: 0,
            remove: 0,
            upgrade: 0,
            gold: 1,
        };
        let mut rng = GeneratorState::seed("gold");
        for _ in 0..50 {
            assert_eq!(roll_bucket(&mut rng, &only_gold), LevelUpBucket::Gold);
        }
    }

    #[test]
    fn every_bucket_is_reachable_with_defaults() {
        let mut rng = GeneratorState::seed("buckets");
        let mut seen = std::collections::BTreeSet::new();
        for _ in 0..2_000 {
            seen.insert(roll_bucket(&mut rng, &BucketWeights::default()).to_string());
        }
        assert_eq!(seen.len(), 8);
    }

    #[test]
    fn card_and_blessing_buckets_offer_two_distinct_candidates() {
        let content = fixture_content();
        let config = GameConfig::default();
        let mut rng = GeneratorState::seed("candidates");
        let mut checked = 0;
        for _ in 0..200 {
            let pending = roll_level_up(&mut rng, &content, &config, &[]);
            match pending.bucket {
                LevelUpBucket::Cards => {
                    assert_eq!(pending.card_choices.len(), 2);
                    assert_ne!(pending.card_choices[0].id, pending.card_choices[1].id);
                    checked += 1;
                }
                LevelUpBucket::Blessing => {
                    assert_eq!(pending.blessing_choices.len(), 2);
                    assert_ne!(pending.blessing_choices[0].id, pending.blessing_choices[1].id);
                    checked += 1;
                }
                _ => assert!(pending.card_choices.is_empty()),
            }
        }
        assert!(checked > 0);
    }

    #[test]
    fn single_threshold_queues_one_level_up() {
        let content = fixture_content();
        let config = GameConfig::default();
        let mut state = fresh_run();
        let mut rng = GeneratorState::seed("exp");

        assert_eq!(grant_exp(&mut state, &mut rng, &content, &config, 10), 0);
        assert!(state.level_up.is_none());

        assert_eq!(grant_exp(&mut state, &mut rng, &content, &config, 10), 1);
        assert_eq!(state.player.level, 2);
        assert_eq!(state.player.exp, 0);
        assert_eq!(state.player.exp_to_next, 40);
        assert!(state.level_up_pending());
    }

    #[test]
    fn multiple_thresholds_log_the_extra_levels() {
        let content = fixture_content();
        let config = GameConfig::default();
        let mut state = fresh_run();
        let mut rng = GeneratorState::seed("boss-exp");

        // 20 + 40 = 60 needed for two levels; 100 crosses two and carries 40
        assert_eq!(grant_exp(&mut state, &mut rng, &content, &config, 100), 2);
        assert_eq!(state.player.level, 3);
        assert_eq!(state.player.exp, 40);
        assert!(state.level_up_pending());
        assert_eq!(state.last_log(), Some("LevelUp queued (multiple levels)."));
    }

    #[test]
    fn queued_line_is_logged_once_per_extra_level() {
        let content = fixture_content();
        let config = GameConfig::default();
        let mut state = fresh_run();
        let mut rng = GeneratorState::seed("many-levels");

        // 20 + 40 + 70 = 130 crosses three thresholds
        assert_eq!(grant_exp(&mut state, &mut rng, &content, &config, 130), 3);
        let queued = state
            .log
            .iter()
            .filter(|line| line.as_str() == "LevelUp queued (multiple levels).")
            .count();
        assert_eq!(queued, 2);

        // a later level while the choice is still open queues once more
        let before = state.log.len();
        let needed = state.player.exp_to_next - state.player.exp;
        assert_eq!(grant_exp(&mut state, &mut rng, &content, &config, needed), 1);
        assert_eq!(state.log.len(), before + 3);
        assert_eq!(state.last_log(), Some("LevelUp queued (multiple levels)."));
    }
}
