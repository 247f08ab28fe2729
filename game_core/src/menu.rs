//! Hold-to-confirm menu selection
//!
//! A menu item is chosen by holding up its number of fingers until the hold
//! timer fills. After every confirmed choice input is ignored briefly so the
//! same gesture does not also trigger the next screen.

use crate::fsm::{Action, Difficulty};
use crate::params::Params;
use crate::resources::Gesture;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItem {
    pub id: u8,
    pub text: &'static str,
    pub action: Action,
}

const fn item(id: u8, text: &'static str, action: Action) -> MenuItem {
    MenuItem { id, text, action }
}

/// Static menu definition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Menu {
    pub title: &'static str,
    pub items: &'static [MenuItem],
}

impl Menu {
    pub const MAIN: Menu = Menu {
        title: "HAND PONG",
        items: &[
            item(1, "VS BOT", Action::ChooseBot),
            item(2, "VS PLAYER (KEYS)", Action::StartPvp),
            item(3, "EXIT", Action::RequestExit),
        ],
    };

    pub const DIFFICULTY: Menu = Menu {
        title: "SELECT DIFFICULTY",
        items: &[
            item(1, "SUPER EASY", Action::StartBot(Difficulty::SuperEasy)),
            item(2, "EASY", Action::StartBot(Difficulty::Easy)),
            item(3, "MIDDLE", Action::StartBot(Difficulty::Middle)),
            item(4, "HARD", Action::StartBot(Difficulty::Hard)),
            item(5, "BACK", Action::Back),
        ],
    };

    pub const CONFIRM_EXIT: Menu = Menu {
        title: "REALLY QUIT?",
        items: &[
            item(1, "YES", Action::ConfirmExit),
            item(2, "NO", Action::Back),
        ],
    };

    pub const PAUSE: Menu = Menu {
        title: "PAUSED",
        items: &[
            item(1, "RESUME", Action::Resume),
            item(2, "RESTART", Action::Restart),
            item(3, "QUIT TO MENU", Action::QuitToMenu),
        ],
    };

    pub fn find(&self, gesture: Gesture) -> Option<&'static MenuItem> {
        let digit = gesture.digit()?;
        self.items.iter().find(|item| item.id == digit)
    }
}

/// Selection state shared by all menus
#[derive(Debug, Clone)]
pub struct MenuSelector {
    selected: Option<u8>,
    hold_timer: f32,
    hold_limit: f32,
    cooldown: f32,
}

impl MenuSelector {
    pub fn new() -> Self {
        Self {
            selected: None,
            hold_timer: 0.0,
            hold_limit: Params::MENU_HOLD_TIME,
            cooldown: 0.0,
        }
    }

    /// Ignore input for a moment, e.g. after switching screens
    pub fn reset_cooldown(&mut self) {
        self.cooldown = Params::MENU_TRANSITION_DELAY;
        self.selected = None;
        self.hold_timer = 0.0;
    }

    /// Feed one frame of gesture input. Returns the confirmed action once the
    /// matching gesture has been held for `hold_time`.
    pub fn update(&mut self, menu: &Menu, gesture: Gesture, dt: f32, hold_time: f32) -> Option<Action> {
        self.hold_limit = hold_time;

        if self.cooldown > 0.0 {
            self.cooldown -= dt;
            return None;
        }

        let Some(target) = menu.find(gesture) else {
            self.selected = None;
            self.hold_timer = 0.0;
            return None;
        };

        if self.selected != Some(target.id) {
            self.selected = Some(target.id);
            self.hold_timer = 0.0;
            return None;
        }

        self.hold_timer += dt;
        if self.hold_timer >= hold_time {
            self.reset_cooldown();
            return Some(target.action);
        }
        None
    }

    pub fn selected(&self) -> Option<u8> {
        self.selected
    }

    /// Hold progress of the highlighted item in [0, 1]
    pub fn progress(&self) -> f32 {
        if self.selected.is_none() || self.hold_limit <= 0.0 {
            return 0.0;
        }
        (self.hold_timer / self.hold_limit).min(1.0)
    }

    pub fn is_cooling_down(&self) -> bool {
        self.cooldown > 0.0
    }
}

impl Default for MenuSelector {
    fn default() -> Self {
        Self::new()
    }
}
