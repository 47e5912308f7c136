pub mod clock;
pub mod dir;
pub mod logging;
pub mod measurement;
pub mod runtime;
pub mod time;
