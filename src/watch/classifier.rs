// src/watch/classifier.rs

use std::path::{Path, PathBuf};

use notify::EventKind;
use notify::event::{CreateKind, Event, ModifyKind, RemoveKind, RenameMode};

use crate::watch::filter::DocumentFilter;

/// A raw filesystem event reduced to what the runtime cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentEvent {
    /// A document appeared or changed; a regeneration pass should be scheduled.
    Changed(PathBuf),
    /// A document disappeared; the name index must be refreshed immediately,
    /// then a regeneration pass scheduled.
    Removed(PathBuf),
}

/// Maps raw `notify` events to zero or more [`DocumentEvent`]s.
///
/// Directory events, access events and anything outside the document filter
/// (wrong extension, or under the excluded output subtree) produce nothing.
#[derive(Debug, Clone)]
pub struct EventClassifier {
    filter: DocumentFilter,
}

impl EventClassifier {
    pub fn new(filter: DocumentFilter) -> Self {
        Self { filter }
    }

    pub fn classify(&self, event: &Event) -> Vec<DocumentEvent> {
        let mut actions = Vec::new();

        match &event.kind {
            EventKind::Create(CreateKind::Folder) | EventKind::Remove(RemoveKind::Folder) => {}
            EventKind::Create(_) => {
                for path in &event.paths {
                    self.push_changed(path, &mut actions);
                }
            }
            EventKind::Modify(ModifyKind::Name(RenameMode::Both)) => {
                // paths are [from, to]; only the destination can introduce a document
                if let Some(dest) = event.paths.last() {
                    self.push_changed(dest, &mut actions);
                }
            }
            EventKind::Modify(ModifyKind::Name(RenameMode::From)) => {
                // the paired To/Both event carries the destination
            }
            EventKind::Modify(_) | EventKind::Any => {
                for path in &event.paths {
                    self.push_changed(path, &mut actions);
                }
            }
            EventKind::Remove(_) => {
                for path in &event.paths {
                    if self.filter.is_relevant(path) {
                        actions.push(DocumentEvent::Removed(path.clone()));
                    }
                }
            }
            EventKind::Access(_) | EventKind::Other => {}
        }

        actions
    }

    fn push_changed(&self, path: &Path, actions: &mut Vec<DocumentEvent>) {
        if path.is_dir() {
            return;
        }
        if self.filter.is_relevant(path) {
            actions.push(DocumentEvent::Changed(path.to_path_buf()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{DataChange, MetadataKind};

    fn classifier() -> EventClassifier {
        let filter = DocumentFilter::new("pdf", Some(Path::new("/watched/thumbs"))).unwrap();
        EventClassifier::new(filter)
    }

    fn event(kind: EventKind, paths: &[&str]) -> Event {
        let mut ev = Event::new(kind);
        for p in paths {
            ev = ev.add_path(PathBuf::from(p));
        }
        ev
    }

    #[test]
    fn create_and_modify_map_to_changed() {
        let c = classifier();

        let ev = event(EventKind::Create(CreateKind::File), &["/watched/a.pdf"]);
        assert_eq!(
            c.classify(&ev),
            vec![DocumentEvent::Changed(PathBuf::from("/watched/a.pdf"))]
        );

        let ev = event(
            EventKind::Modify(ModifyKind::Data(DataChange::Content)),
            &["/watched/a.pdf"],
        );
        assert_eq!(
            c.classify(&ev),
            vec![DocumentEvent::Changed(PathBuf::from("/watched/a.pdf"))]
        );
    }

    #[test]
    fn remove_maps_to_removed() {
        let c = classifier();
        let ev = event(EventKind::Remove(RemoveKind::File), &["/watched/a.pdf"]);
        assert_eq!(
            c.classify(&ev),
            vec![DocumentEvent::Removed(PathBuf::from("/watched/a.pdf"))]
        );
    }

    #[test]
    fn rename_classifies_the_destination_only() {
        let c = classifier();
        let ev = event(
            EventKind::Modify(ModifyKind::Name(RenameMode::Both)),
            &["/watched/a.tmp", "/watched/a.pdf"],
        );
        assert_eq!(
            c.classify(&ev),
            vec![DocumentEvent::Changed(PathBuf::from("/watched/a.pdf"))]
        );

        // rename away from a document: the departure half produces nothing
        let ev = event(
            EventKind::Modify(ModifyKind::Name(RenameMode::From)),
            &["/watched/a.pdf"],
        );
        assert!(c.classify(&ev).is_empty());
    }

    #[test]
    fn events_under_the_output_subtree_are_dropped() {
        let c = classifier();
        for kind in [
            EventKind::Create(CreateKind::File),
            EventKind::Modify(ModifyKind::Data(DataChange::Content)),
            EventKind::Remove(RemoveKind::File),
        ] {
            let ev = event(kind, &["/watched/thumbs/a.pdf"]);
            assert!(c.classify(&ev).is_empty(), "kind {kind:?} must be dropped");
        }
    }

    #[test]
    fn irrelevant_extensions_and_noise_produce_nothing() {
        let c = classifier();

        let ev = event(EventKind::Create(CreateKind::File), &["/watched/names.txt"]);
        assert!(c.classify(&ev).is_empty());

        let ev = event(
            EventKind::Modify(ModifyKind::Metadata(MetadataKind::Any)),
            &["/watched/other.log"],
        );
        assert!(c.classify(&ev).is_empty());

        let ev = event(EventKind::Create(CreateKind::Folder), &["/watched/sub.pdf"]);
        assert!(c.classify(&ev).is_empty());
    }
}
