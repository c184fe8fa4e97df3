//! Command implementations

mod inspect;
mod run;
mod verify;

pub use inspect::Inspect;
pub use run::Run;
pub use verify::Verify;
