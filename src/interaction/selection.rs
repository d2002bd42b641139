/// The single photo frame currently magnified toward the viewer, if any.
///
/// Selecting a frame replaces any previous selection; selecting the frame
/// that is already active clears it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActiveSelection {
    active: Option<usize>,
}

impl ActiveSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle `index` and return the new selection
    pub fn toggle(&mut self, index: usize) -> Option<usize> {
        self.active = if self.active == Some(index) {
            None
        } else {
            Some(index)
        };
        self.active
    }

    pub fn clear(&mut self) {
        self.active = None;
    }

    pub fn get(&self) -> Option<usize> {
        self.active
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.active == Some(index)
    }

    /// Drop the selection if it no longer points at one of `count` frames
    pub fn retain_within(&mut self, count: usize) {
        if self.active.is_some_and(|i| i >= count) {
            log::debug!("clearing selection {:?}, only {} frames", self.active, count);
            self.active = None;
        }
    }
}
