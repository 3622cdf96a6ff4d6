//! Plain text status panel. Reads the game state, never changes it.

use crate::clock::Clock;
use crate::model::GameState;
use crate::pet::CommandOutcome;
use crate::state::PetState;
use crate::vital::VitalStatistic;
use crossterm::{
    cursor, execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Stdout, Write};

const BAR_WIDTH: usize = 20;

pub struct Terminal {
    out: Stdout,
    active: bool,
}

impl Terminal {
    pub fn begin() -> anyhow::Result<Self> {
        let mut out = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(out, EnterAlternateScreen, cursor::Hide)?;
        Ok(Self { out, active: true })
    }

    pub fn end(&mut self) -> anyhow::Result<()> {
        if self.active {
            self.active = false;
            execute!(self.out, ResetColor, cursor::Show, LeaveAlternateScreen)?;
            terminal::disable_raw_mode()?;
        }
        Ok(())
    }

    pub fn draw(&mut self, lines: &[Line]) -> anyhow::Result<()> {
        queue!(self.out, Clear(ClearType::All))?;
        for (row, line) in lines.iter().enumerate() {
            queue!(
                self.out,
                cursor::MoveTo(0, row as u16),
                SetForegroundColor(line.color),
                Print(&line.text),
                ResetColor
            )?;
        }
        self.out.flush()?;
        Ok(())
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = self.end();
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Line {
    pub text: String,
    pub color: Color,
}

impl Line {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: Color::White,
        }
    }
}

pub fn status_lines(
    st: &GameState,
    clock: &dyn Clock,
    message: &str,
    color: bool,
) -> Vec<Line> {
    let pet = &st.pet;
    let tint = |c: Color| if color { c } else { Color::White };
    let mut lines = vec![
        Line {
            text: format!("{} the {} is {}", pet.name(), pet.pet_type(), pet.state()),
            color: tint(state_color(pet.state())),
        },
        Line::plain(""),
    ];

    for (label, stat) in [
        ("health   ", pet.health()),
        ("sleep    ", pet.sleep()),
        ("fullness ", pet.fullness()),
        ("happiness", pet.happiness()),
    ] {
        let low = stat.is_below_warning_threshold();
        lines.push(Line {
            text: format!(
                "{label} {} {:>5.1}/{}{}",
                bar(stat),
                stat.current(),
                stat.max(),
                if low { "  !" } else { "" }
            ),
            color: tint(if low { Color::Red } else { Color::Green }),
        });
    }

    lines.push(Line::plain(""));
    lines.push(Line::plain(format!(
        "play: {}   vet: {}",
        readiness(pet.can_play(clock), pet.play_cooldown_remaining(clock)),
        readiness(pet.can_visit_vet(clock), pet.vet_cooldown_remaining(clock)),
    )));

    let items: Vec<String> = st
        .inventory
        .iter()
        .map(|(item, n)| format!("{} x{}", item.name, n))
        .collect();
    lines.push(Line::plain(format!(
        "items: {}",
        if items.is_empty() { "none".to_string() } else { items.join(", ") }
    )));

    let played = st.playtime(clock.now()).num_minutes();
    let limit = if st.parental.enabled {
        format!(" / {} min", st.parental.limit_minutes)
    } else {
        String::new()
    };
    lines.push(Line::plain(format!("score: {}   playtime: {} min{}", st.score, played, limit)));
    lines.push(Line::plain(""));
    lines.push(Line {
        text: message.to_string(),
        color: tint(Color::Yellow),
    });
    lines.push(Line::plain(""));
    let help = if pet.is_dead() {
        "[r] revive  [q] quit"
    } else {
        "[f] feed [g] gift [p] play [e] exercise [v] vet [b] bed [q] quit"
    };
    lines.push(Line {
        text: help.to_string(),
        color: tint(Color::DarkGrey),
    });
    lines
}

/// Short human-readable result of a command.
pub fn describe(outcome: CommandOutcome) -> String {
    match outcome {
        CommandOutcome::Applied => "Done.".to_string(),
        CommandOutcome::Refused { state, action } => {
            format!("Can't {action} right now, your pet is {state}.")
        }
        CommandOutcome::OnCooldown { action, remaining } => {
            format!("{action} is cooling down ({}s left).", remaining.num_seconds().max(1))
        }
        CommandOutcome::Unsuitable => "That item doesn't work for that.".to_string(),
        CommandOutcome::NotInInventory => "You don't have anything for that.".to_string(),
    }
}

fn bar(stat: &VitalStatistic) -> String {
    let filled = ((stat.fraction() * BAR_WIDTH as f32).round() as usize).min(BAR_WIDTH);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

fn readiness(ready: bool, remaining: Option<chrono::Duration>) -> String {
    match (ready, remaining) {
        (true, _) => "ready".to_string(),
        (false, Some(r)) => format!("{}s", r.num_seconds().max(1)),
        (false, None) => "unavailable".to_string(),
    }
}

fn state_color(state: PetState) -> Color {
    match state {
        PetState::Normal => Color::Green,
        PetState::Sleeping => Color::Blue,
        PetState::Hungry => Color::Yellow,
        PetState::Angry => Color::Red,
        PetState::Dead => Color::DarkGrey,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::pet::{Pet, PetType};
    use crate::state::Action;
    use chrono::Duration;

    #[test]
    fn test_bar_fills_proportionally() {
        let half = VitalStatistic::new(100, 50.0, 0.0);
        assert_eq!(bar(&half), format!("[{}{}]", "#".repeat(10), "-".repeat(10)));
        let empty = VitalStatistic::new(100, 0.0, 0.0);
        assert_eq!(bar(&empty), format!("[{}]", "-".repeat(BAR_WIDTH)));
    }

    #[test]
    fn test_describe() {
        assert_eq!(describe(CommandOutcome::Applied), "Done.");
        assert_eq!(
            describe(CommandOutcome::Refused {
                state: PetState::Angry,
                action: Action::Feed
            }),
            "Can't feed right now, your pet is angry."
        );
        assert_eq!(
            describe(CommandOutcome::OnCooldown {
                action: Action::Play,
                remaining: Duration::seconds(12)
            }),
            "play is cooling down (12s left)."
        );
    }

    #[test]
    fn test_status_mentions_state_and_warnings() {
        let clock = ManualClock::default();
        let mut st = GameState::new(Pet::new("Mochi", PetType::Puppy).unwrap());
        st.apply(crate::sim::Command::Play, &clock);
        let lines = status_lines(&st, &clock, "hello", false);
        assert_eq!(lines[0].text, "Mochi the puppy is normal");
        assert!(lines.iter().any(|l| l.text.starts_with("play: 30s")));
        assert!(lines.iter().any(|l| l.text == "hello"));
        assert!(lines.iter().all(|l| l.color == Color::White));
    }
}
