pub mod cli;
pub mod io;
pub mod logging;
pub mod model;
pub mod nav;
pub mod ops;
pub mod tui;
pub mod util;
pub mod views;
