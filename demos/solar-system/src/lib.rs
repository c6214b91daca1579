use wasm_bindgen::prelude::*;

mod bodies;
mod builder;
mod game;
mod rig;
mod theme;
mod tooltip;
use game::SolarSystem;

orrery_web::export_app!(SolarSystem, "solar-system");
