pub mod input;
pub mod rng;
pub mod sprite;
pub mod time;
