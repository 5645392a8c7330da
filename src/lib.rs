//! A grid snake game: the model, its timers and a software renderer for an
//! RGBA framebuffer. The binary hosts it in a `winit` window via `pixels`.

pub mod config;
pub mod draw;
pub mod game;
pub mod grid;
pub mod input;
pub mod session;
pub mod timer;
