// Game layer: the animated character and its configuration

pub mod character;
pub mod config;
