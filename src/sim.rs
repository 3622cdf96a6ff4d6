use crate::clock::Clock;
use crate::model::GameState;
use crate::pet::CommandOutcome;

pub const SCORE_FEED: i64 = 5;
pub const SCORE_GIFT: i64 = 5;
pub const SCORE_PLAY: i64 = 10;
pub const SCORE_EXERCISE: i64 = 10;
pub const SCORE_VET: i64 = 5;
pub const SCORE_BED: i64 = 2;
pub const SCORE_DEATH: i64 = -50;
pub const SCORE_REVIVE: i64 = -25;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Feed(String),
    Gift(String),
    GoToBed,
    TakeToVet,
    Play,
    Exercise,
    Revive,
}

impl GameState {
    /// Runs one player command against the pet. Items come out of the
    /// inventory only when the pet actually took them.
    pub fn apply(&mut self, command: Command, clock: &dyn Clock) -> CommandOutcome {
        let (outcome, points) = match command {
            Command::Feed(name) => (self.use_item(&name, true), SCORE_FEED),
            Command::Gift(name) => (self.use_item(&name, false), SCORE_GIFT),
            Command::GoToBed => (self.pet.go_to_bed(), SCORE_BED),
            Command::TakeToVet => (self.pet.take_to_vet(clock), SCORE_VET),
            Command::Play => (self.pet.play(clock), SCORE_PLAY),
            Command::Exercise => (self.pet.exercise(), SCORE_EXERCISE),
            Command::Revive => {
                self.pet.revive();
                (CommandOutcome::Applied, SCORE_REVIVE)
            }
        };
        if outcome.executed() {
            self.score += points;
        }
        outcome
    }

    /// Advances the pet one tick. Dying costs points once.
    pub fn tick(&mut self) {
        let was_dead = self.pet.is_dead();
        self.pet.tick();
        self.sim_ticks += 1;
        if !was_dead && self.pet.is_dead() {
            self.score += SCORE_DEATH;
        }
    }

    fn use_item(&mut self, name: &str, as_food: bool) -> CommandOutcome {
        let Some(item) = self.inventory.get(name).cloned() else {
            return CommandOutcome::NotInInventory;
        };
        let outcome = if as_food {
            self.pet.feed(&item)
        } else {
            self.pet.receive_gift(&item)
        };
        if outcome.executed() {
            self.inventory.remove_item(name);
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::item::Item;
    use crate::pet::{Pet, PetType};
    use crate::state::PetState;

    fn game() -> GameState {
        GameState::new(Pet::new("Mochi", PetType::Puppy).unwrap())
    }

    #[test]
    fn test_feed_consumes_one_item() {
        let clock = ManualClock::default();
        let mut g = game();
        g.grant_item(Item::food("kibble", 10.0), 2);

        assert!(g.apply(Command::Feed("kibble".into()), &clock).executed());
        assert_eq!(g.inventory.item_count("kibble"), 1);
        assert_eq!(g.pet.fullness().current(), 85.0);
        assert_eq!(g.score, SCORE_FEED);
    }

    #[test]
    fn test_missing_item() {
        let clock = ManualClock::default();
        let mut g = game();
        assert_eq!(
            g.apply(Command::Gift("ball".into()), &clock),
            CommandOutcome::NotInInventory
        );
        assert_eq!(g.score, 0);
    }

    #[test]
    fn test_refused_command_keeps_item_and_score() {
        let clock = ManualClock::default();
        let mut g = game();
        g.grant_item(Item::food("kibble", 10.0), 1);
        g.apply(Command::GoToBed, &clock);
        let score = g.score;

        let outcome = g.apply(Command::Feed("kibble".into()), &clock);
        assert!(matches!(
            outcome,
            CommandOutcome::Refused {
                state: PetState::Sleeping,
                ..
            }
        ));
        assert_eq!(g.inventory.item_count("kibble"), 1);
        assert_eq!(g.score, score);
    }

    #[test]
    fn test_wrong_kind_keeps_item() {
        let clock = ManualClock::default();
        let mut g = game();
        g.grant_item(Item::gift("ball", 10.0), 1);
        assert_eq!(
            g.apply(Command::Feed("ball".into()), &clock),
            CommandOutcome::Unsuitable
        );
        assert_eq!(g.inventory.item_count("ball"), 1);
    }

    #[test]
    fn test_negative_items_are_kept_and_score_nothing() {
        let clock = ManualClock::default();
        let mut g = game();
        g.grant_item(Item::food("rot", -75.0), 1);
        g.grant_item(Item::gift("insult", -40.0), 1);
        let before = *g.pet.vitals();

        assert_eq!(
            g.apply(Command::Feed("rot".into()), &clock),
            CommandOutcome::Unsuitable
        );
        assert_eq!(
            g.apply(Command::Gift("insult".into()), &clock),
            CommandOutcome::Unsuitable
        );
        assert_eq!(g.inventory.item_count("rot"), 1);
        assert_eq!(g.inventory.item_count("insult"), 1);
        assert_eq!(g.score, 0);
        assert_eq!(*g.pet.vitals(), before);
    }

    #[test]
    fn test_death_and_revive_can_push_score_negative() {
        let clock = ManualClock::default();
        let mut g = game();
        while !g.pet.is_dead() {
            g.tick();
        }
        assert_eq!(g.score, SCORE_DEATH);
        g.tick();
        assert_eq!(g.score, SCORE_DEATH);

        assert!(g.apply(Command::Revive, &clock).executed());
        assert_eq!(g.score, SCORE_DEATH + SCORE_REVIVE);
        assert_eq!(g.pet.state(), PetState::Normal);
        assert!(g.sim_ticks > 0);
    }

    #[test]
    fn test_cooldown_rejection_scores_nothing() {
        let clock = ManualClock::default();
        let mut g = game();
        assert!(g.apply(Command::Play, &clock).executed());
        assert!(!g.apply(Command::Play, &clock).executed());
        assert_eq!(g.score, SCORE_PLAY);
    }
}
