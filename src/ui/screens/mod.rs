pub mod display;
pub mod matching;
pub mod upload;
