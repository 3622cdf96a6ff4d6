use crate::clock::{Clock, SystemClock};
use crate::config::{load_settings, save_settings_atomic, Paths, Settings};
use crate::input::{collect_input, map_event_to_action, to_command, PlayerAction};
use crate::item::Item;
use crate::model::{GameState, SaveFile};
use crate::pet::{Pet, PetType};
use crate::render::{describe, status_lines, Terminal};
use crate::storage::{load_or_init_save, save_atomic};
use rand::seq::SliceRandom;
use std::time::{Duration, Instant};

/// Items the front-end hands out between ticks.
const CATALOG: &[(&str, bool, f32)] = &[
    ("kibble", true, 20.0),
    ("apple", true, 10.0),
    ("steak", true, 40.0),
    ("ball", false, 15.0),
    ("yarn", false, 25.0),
    ("plushie", false, 60.0),
];

/// Overrides for a brand new pet, taken from the command line.
#[derive(Clone, Debug, Default)]
pub struct LaunchOptions {
    pub pet_name: Option<String>,
    pub pet_type: Option<PetType>,
}

impl LaunchOptions {
    /// Settings for seeding a new pet. The stored preferences stay as they
    /// were, so one launch's overrides are not written back on exit.
    fn seed(&self, settings: &Settings) -> Settings {
        let mut seeded = settings.clone();
        if let Some(name) = &self.pet_name {
            seeded.pet_name = name.clone();
        }
        if let Some(pet_type) = self.pet_type {
            seeded.pet_type = pet_type;
        }
        seeded
    }
}

pub struct App {
    settings: Settings,
    state: GameState,
    paths: Paths,
    clock: SystemClock,
    term: Terminal,
    message: String,
    should_quit: bool,
    ticks_since_grant: u64,
    autosave_at: Instant,
}

impl App {
    fn init(paths: Paths, opts: LaunchOptions) -> anyhow::Result<Self> {
        let settings = load_settings(&paths.settings_path);
        let seed = opts.seed(&settings);
        // fail before touching the terminal
        Pet::new(&seed.pet_name, seed.pet_type)?;

        let clock = SystemClock;
        let (mut state, last_seen) = load_or_init_save(&paths.save_path, &seed)?;
        match last_seen {
            Some(at) => tracing::info!(pet = state.pet.name(), last_seen = %at, "save loaded"),
            None => tracing::info!(pet = state.pet.name(), "new game"),
        }
        state.set_time_limit(settings.time_limit_enabled, settings.time_limit_minutes);
        state.start_session(clock.now());

        let term = Terminal::begin()?;
        let autosave_at = Instant::now() + Duration::from_secs(settings.autosave_secs.max(1));

        Ok(Self {
            settings,
            state,
            paths,
            clock,
            term,
            message: String::from("Welcome back!"),
            should_quit: false,
            ticks_since_grant: 0,
            autosave_at,
        })
    }

    fn run(&mut self) -> anyhow::Result<()> {
        let tick = Duration::from_millis(self.settings.tick_interval_ms());
        let mut next_tick = Instant::now() + tick;
        self.render()?;

        while !self.should_quit {
            let wait = next_tick.saturating_duration_since(Instant::now());
            let mut dirty = false;
            for ev in collect_input(wait)? {
                let Some(action) = map_event_to_action(&ev, self.state.pet.is_dead()) else {
                    continue;
                };
                self.handle(action);
                dirty = true;
                if self.should_quit {
                    break;
                }
            }

            while Instant::now() >= next_tick {
                self.on_tick();
                next_tick += tick;
                dirty = true;
            }

            if self.state.time_limit_reached(self.clock.now()) {
                tracing::info!(minutes = self.state.parental.limit_minutes, "time limit reached");
                self.should_quit = true;
            }

            if dirty {
                self.render()?;
            }

            if Instant::now() >= self.autosave_at {
                self.save_now()?;
                self.autosave_at =
                    Instant::now() + Duration::from_secs(self.settings.autosave_secs.max(1));
            }
        }

        self.state.end_session(self.clock.now());
        self.save_now()?;
        self.term.end()?;
        save_settings_atomic(&self.paths.settings_path, &self.settings)?;
        Ok(())
    }

    fn handle(&mut self, action: PlayerAction) {
        let Some(command) = to_command(action, &self.state.inventory) else {
            self.should_quit = true;
            return;
        };
        tracing::debug!(?command, "player command");
        let outcome = self.state.apply(command, &self.clock);
        self.message = describe(outcome);
    }

    fn on_tick(&mut self) {
        let was_dead = self.state.pet.is_dead();
        self.state.tick();
        if !was_dead && self.state.pet.is_dead() {
            self.message = format!("{} has passed on. Press r to revive.", self.state.pet.name());
        }

        self.ticks_since_grant += 1;
        if self.settings.grant_every_ticks > 0
            && self.ticks_since_grant >= self.settings.grant_every_ticks
        {
            self.ticks_since_grant = 0;
            if let Some(&(name, food, value)) = CATALOG.choose(&mut rand::thread_rng()) {
                let item = if food {
                    Item::food(name, value)
                } else {
                    Item::gift(name, value)
                };
                self.message = format!("You found a {name}!");
                self.state.grant_item(item, 1);
            }
        }
    }

    fn render(&mut self) -> anyhow::Result<()> {
        let lines = status_lines(
            &self.state,
            &self.clock,
            &self.message,
            self.settings.enable_color,
        );
        self.term.draw(&lines)
    }

    fn save_now(&self) -> anyhow::Result<()> {
        let save = SaveFile::new(self.state.clone(), self.clock.now());
        save_atomic(&self.paths.save_path, &save)?;
        Ok(())
    }
}

pub fn run(paths: Paths, opts: LaunchOptions) -> anyhow::Result<()> {
    let mut app = App::init(paths, opts)?;
    app.run()?;
    Ok(())
}
