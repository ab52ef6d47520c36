/// Whether the page is worth drawing into.
///
/// Hidden tabs and unfocused windows keep their frame callback alive but skip
/// all simulation and drawing, so resuming costs nothing and never replays
/// the frames that were skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityGate {
    active: bool,
}

impl VisibilityGate {
    pub fn new(page_hidden: bool, has_focus: bool) -> Self {
        Self { active: !page_hidden && has_focus }
    }

    pub fn always_active() -> Self {
        Self { active: true }
    }

    pub fn on_visibility_change(&mut self, page_hidden: bool) {
        self.active = !page_hidden;
    }

    pub fn on_blur(&mut self) {
        self.active = false;
    }

    pub fn on_focus(&mut self) {
        self.active = true;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}
