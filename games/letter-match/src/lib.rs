use wasm_bindgen::prelude::*;
use modulith_engine::*;

pub mod config;
pub mod game;
pub mod hud;
pub mod module;
pub mod physics;
pub mod picking;
pub mod pool;
pub mod prefs;
pub mod round;
pub mod scoring;
pub mod words;

use game::LetterMatch;

modulith_web::export_game!(LetterMatch, "letter-match");
