use wasm_bindgen::prelude::*;
use orrery_engine::*;

mod bodies;
mod game;
mod orbit;
mod panel;
use game::SolarSystem;

orrery_web::export_game!(SolarSystem, "solar-system", vectors);
