pub mod controller;
pub mod generator;
pub mod model;
pub mod router;
pub mod service;

pub use model::*;
pub use router::init_signup_pins_router;
