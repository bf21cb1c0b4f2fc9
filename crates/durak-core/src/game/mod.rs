pub mod engine;
pub mod error;
pub mod log;
pub mod record;
pub mod rotation;
pub mod round;
pub mod rules;
