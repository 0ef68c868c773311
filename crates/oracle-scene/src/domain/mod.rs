pub mod blocks;
pub mod commands;
pub mod state;
