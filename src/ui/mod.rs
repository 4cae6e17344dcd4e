pub mod format;
pub mod screens;
pub mod state;
