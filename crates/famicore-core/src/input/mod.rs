//! Controller input.

mod controller;

pub use controller::{Buttons, Controller};
