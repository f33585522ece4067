//! Selection state

use serde::{Deserialize, Serialize};

/// Which playlist slot is selected, plus the engine-driven one-shot flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SelectionState {
    /// Index of the selected track, `None` before the first selection.
    pub selected_index: Option<usize>,

    /// One-shot marker: the engine already moved to the target item, so
    /// the next selection application must not re-prime it. Consumed and
    /// cleared by exactly one selection application.
    pub auto_advance: bool,
}

impl SelectionState {
    /// Consume the one-shot flag, clearing it unconditionally.
    pub fn take_auto_advance(&mut self) -> bool {
        std::mem::take(&mut self.auto_advance)
    }
}
