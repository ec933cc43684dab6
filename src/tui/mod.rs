//! Full-screen terminal front end for the presentation controller.

mod app;
mod input;
mod ui;

pub use app::{AlertDialog, App, Focus, run};
pub use input::TextInput;
