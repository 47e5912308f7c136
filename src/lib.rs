//! Small cli for recording daily personal metrics (weight, sleep, pushups, anything with a number)
//! and looking at them as a graph right in the terminal.
//! Missing days are filled in for the graph, the recorded data is never changed by it.
//!

pub mod cli;
pub mod fs;
pub mod series;
pub mod storage;
pub mod tui;
pub mod utils;
