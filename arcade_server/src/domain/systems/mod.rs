// Pure simulation rules. No I/O, no session bookkeeping.

pub mod combat;
pub mod motion;
pub mod spawning;
pub mod standings;
