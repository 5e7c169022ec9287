pub mod outfit;
pub mod preferences;
