mod app;
mod screens;
mod state;
mod textures;

pub use app::launch_gui;
