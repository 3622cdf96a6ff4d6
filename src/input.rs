use crate::inventory::Inventory;
use crate::sim::Command;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct InputEvent {
    pub key: KeyCode,
    pub mods: KeyModifiers,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerAction {
    Feed,
    Gift,
    Bed,
    Vet,
    Play,
    Exercise,
    Revive,
    Quit,
}

/// Waits up to `timeout` for the first key, then drains whatever else is
/// already queued.
pub fn collect_input(timeout: Duration) -> anyhow::Result<Vec<InputEvent>> {
    let mut out = Vec::new();
    let mut wait = timeout;
    while event::poll(wait)? {
        if let Event::Key(k) = event::read()? {
            if k.kind == KeyEventKind::Press || k.kind == KeyEventKind::Repeat {
                out.push(InputEvent {
                    key: k.code,
                    mods: k.modifiers,
                });
                if out.len() >= 32 {
                    break;
                }
            }
        }
        wait = Duration::ZERO;
    }
    Ok(out)
}

pub fn map_event_to_action(ev: &InputEvent, pet_dead: bool) -> Option<PlayerAction> {
    if matches!(ev.key, KeyCode::Char('c') | KeyCode::Char('C'))
        && ev.mods.contains(KeyModifiers::CONTROL)
    {
        return Some(PlayerAction::Quit);
    }
    let KeyCode::Char(ch) = ev.key else {
        return match ev.key {
            KeyCode::Esc => Some(PlayerAction::Quit),
            _ => None,
        };
    };
    match ch.to_ascii_lowercase() {
        'q' => Some(PlayerAction::Quit),
        'r' if pet_dead => Some(PlayerAction::Revive),
        'f' => Some(PlayerAction::Feed),
        'g' => Some(PlayerAction::Gift),
        'b' => Some(PlayerAction::Bed),
        'v' => Some(PlayerAction::Vet),
        'p' => Some(PlayerAction::Play),
        'e' => Some(PlayerAction::Exercise),
        _ => None,
    }
}

/// Turns a key action into a pet command. Feed and gift use the first
/// matching item in name order; with none on hand the command still goes
/// through and reports the empty inventory.
pub fn to_command(action: PlayerAction, inventory: &Inventory) -> Option<Command> {
    let pick = |item: Option<&crate::item::Item>| {
        item.map(|i| i.name.clone()).unwrap_or_default()
    };
    match action {
        PlayerAction::Feed => Some(Command::Feed(pick(inventory.first_food()))),
        PlayerAction::Gift => Some(Command::Gift(pick(inventory.first_gift()))),
        PlayerAction::Bed => Some(Command::GoToBed),
        PlayerAction::Vet => Some(Command::TakeToVet),
        PlayerAction::Play => Some(Command::Play),
        PlayerAction::Exercise => Some(Command::Exercise),
        PlayerAction::Revive => Some(Command::Revive),
        PlayerAction::Quit => None,
    }
}
