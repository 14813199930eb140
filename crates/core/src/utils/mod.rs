pub mod number_input;

pub use number_input::*;
