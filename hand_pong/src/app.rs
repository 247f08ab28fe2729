//! Frame loop: hand controller, then the handler for the current phase,
//! then an optional snapshot line.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use game_core::{
    Action, GameEngine, Gesture, Menu, MenuSelector, PaddleIntent, Params, Phase, Snapshot,
};
use hand_input::{HandController, HandReading, LandmarkFrame, LandmarkSource};
use serde::Serialize;
use tracing::{debug, info};

use crate::keys::KeyScript;

/// Menu overlay for the renderer
#[derive(Debug, Clone, Serialize)]
pub struct MenuView {
    pub title: &'static str,
    pub items: Vec<(u8, &'static str)>,
    pub selected: Option<u8>,
    pub progress: f32,
}

/// One stdout line
#[derive(Debug, Clone, Serialize)]
pub struct FrameView {
    pub frame: u64,
    pub hands: usize,
    pub gesture: String,
    pub pause_progress: f32,
    pub menu: Option<MenuView>,
    pub game: Snapshot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: u64,
    pub final_phase: Phase,
}

pub struct App {
    engine: GameEngine,
    controller: HandController,
    selector: MenuSelector,
    frame: u64,
    last_reading: Option<HandReading>,
}

/// Menu shown in `phase`, with its hold time
fn menu_for(phase: Phase) -> Option<(&'static Menu, f32)> {
    match phase {
        Phase::Menu => Some((&Menu::MAIN, Params::MENU_HOLD_TIME)),
        Phase::DifficultySelect => Some((&Menu::DIFFICULTY, Params::MENU_HOLD_TIME)),
        Phase::ConfirmExit => Some((&Menu::CONFIRM_EXIT, Params::MENU_HOLD_TIME)),
        Phase::Paused => Some((&Menu::PAUSE, Params::PAUSE_SELECTION_TIME)),
        Phase::Playing | Phase::GameOver | Phase::Exited => None,
    }
}

impl App {
    pub fn new(engine: GameEngine, controller: HandController) -> Self {
        Self {
            engine,
            controller,
            selector: MenuSelector::new(),
            frame: 0,
            last_reading: None,
        }
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    pub fn phase(&self) -> Phase {
        self.engine.phase()
    }

    /// Process one camera frame
    pub fn step(&mut self, frame: &LandmarkFrame, keys: PaddleIntent, dt: f32) -> Phase {
        self.frame += 1;
        let reading = self.controller.process(frame, dt);
        self.last_reading = Some(reading);
        let before = self.engine.phase();

        match before {
            Phase::Playing => {
                self.engine.update(&reading.tick_input(keys), dt);
            }
            Phase::GameOver => {
                if reading.gesture == Gesture::Digit(5) {
                    self.engine.apply(Action::ReturnToMenu);
                }
            }
            Phase::Exited => {}
            phase => {
                if let Some((menu, hold_time)) = menu_for(phase) {
                    if let Some(action) = self.selector.update(menu, reading.gesture, dt, hold_time) {
                        debug!(menu = menu.title, ?action, "menu selection");
                        self.engine.apply(action);
                    }
                }
            }
        }

        let after = self.engine.phase();
        if after != before {
            // New screen: let go of the gesture that got us here
            self.selector.reset_cooldown();
        }
        after
    }

    pub fn view(&self) -> FrameView {
        let reading = self.last_reading;
        let menu = menu_for(self.phase()).map(|(menu, _)| MenuView {
            title: menu.title,
            items: menu.items.iter().map(|item| (item.id, item.text)).collect(),
            selected: self.selector.selected(),
            progress: self.selector.progress(),
        });

        FrameView {
            frame: self.frame,
            hands: reading.map_or(0, |r| r.hands_detected),
            gesture: reading.map_or(Gesture::Neutral, |r| r.gesture).to_string(),
            pause_progress: reading.map_or(0.0, |r| r.pause_progress),
            menu,
            game: self.engine.snapshot(),
        }
    }

    /// Run until the landmark stream ends or the player exits
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        source: &mut dyn LandmarkSource,
        keys: &mut KeyScript<R>,
        mut snapshots: Option<W>,
    ) -> Result<RunSummary> {
        let dt = 1.0 / Params::FPS as f32;

        while self.phase() != Phase::Exited {
            let Some(frame) = source.next_frame().context("reading landmark frame")? else {
                info!(frames = self.frame, "landmark stream ended");
                break;
            };
            let intent = keys.next_intent()?;
            self.step(&frame, intent, dt);

            if let Some(out) = snapshots.as_mut() {
                serde_json::to_writer(&mut *out, &self.view()).context("encoding snapshot")?;
                writeln!(out).context("writing snapshot")?;
            }
        }

        if let Some(out) = snapshots.as_mut() {
            out.flush().context("flushing snapshots")?;
        }
        info!(frames = self.frame, phase = ?self.phase(), "session finished");
        Ok(RunSummary {
            frames: self.frame,
            final_phase: self.phase(),
        })
    }
}
