pub mod generator;

pub use generator::ResetTokenGenerator;
