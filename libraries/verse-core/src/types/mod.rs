mod phase;
mod progress;
mod selection;
mod track;

pub use phase::{AdvanceDirection, PlaybackPhase};
pub use progress::{format_clock, PlaybackProgress};
pub use selection::SelectionState;
pub use track::Track;
