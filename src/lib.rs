pub mod audio;
pub mod config;
pub mod error;
pub mod fruit;
pub mod game;
pub mod grid;
pub mod input;
pub mod registry;
pub mod renderer;
pub mod snake;
pub mod symbols;
pub mod terminal_runtime;
pub mod ui;
