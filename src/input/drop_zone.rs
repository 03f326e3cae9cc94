use crate::input::upload::FileCandidate;

/// Drag gestures reported by the upload area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragEvent {
    Enter,
    Over,
    Leave,
}

/// Tracks the "drag active" highlight of the upload area.
#[derive(Debug, Default, Clone)]
pub struct DropZone {
    active: bool,
}

impl DropZone {
    pub fn new() -> Self {
        DropZone::default()
    }

    pub fn handle(&mut self, event: DragEvent) {
        self.active = match event {
            DragEvent::Enter | DragEvent::Over => true,
            DragEvent::Leave => false,
        };
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Ends the drag and hands back the first dropped file; the rest are ignored.
    pub fn drop_files(&mut self, files: Vec<FileCandidate>) -> Option<FileCandidate> {
        self.active = false;
        files.into_iter().next()
    }

    pub fn clear(&mut self) {
        self.active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str) -> FileCandidate {
        FileCandidate::new(name, "image/png", vec![0u8; 4])
    }

    #[test]
    fn enter_and_over_activate_leave_clears() {
        let mut zone = DropZone::new();
        zone.handle(DragEvent::Enter);
        assert!(zone.is_active());
        zone.handle(DragEvent::Over);
        assert!(zone.is_active());
        zone.handle(DragEvent::Leave);
        assert!(!zone.is_active());
    }

    #[test]
    fn drop_keeps_first_file_only() {
        let mut zone = DropZone::new();
        zone.handle(DragEvent::Over);
        let picked = zone.drop_files(vec![file("a.png"), file("b.png"), file("c.png")]);
        assert_eq!(picked.map(|f| f.name), Some("a.png".to_owned()));
        assert!(!zone.is_active());
    }

    #[test]
    fn empty_drop_yields_nothing() {
        let mut zone = DropZone::new();
        zone.handle(DragEvent::Enter);
        assert!(zone.drop_files(Vec::new()).is_none());
        assert!(!zone.is_active());
    }
}
