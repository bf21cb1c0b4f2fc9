pub mod game;
pub mod model;

pub use game::engine::{GameEngine, GameOutcome, play_game};
pub use game::error::GameError;
pub use game::rules::{DRAW_SENTINEL, RulesConfig};

pub struct AppInfo;

impl AppInfo {
    pub const fn name() -> &'static str {
        "durak"
    }

    pub const fn codename() -> &'static str {
        "Fool"
    }

    pub const fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}
