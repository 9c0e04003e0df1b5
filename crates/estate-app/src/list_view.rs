//! Fetched collection state
//!
//! `Idle → Loading → Loaded | Errored`, and back to `Loading` on every
//! refresh. Each refresh bumps the view's generation; a completion carries the
//! generation it was requested for and is dropped when a newer refresh has
//! been started since.

use estate_core::{Entity, EntityKind};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ListStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    Errored(String),
}

/// Which view a list fetch was issued for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListOwner {
    /// The list half of a collection page
    Page,
    /// The dashboard overview
    Overview,
}

#[derive(Debug, Clone)]
pub struct ListView {
    kind: EntityKind,
    status: ListStatus,
    records: Vec<Entity>,
    generation: u64,
    selected: usize,
}

impl ListView {
    pub fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            status: ListStatus::Idle,
            records: Vec::new(),
            generation: 0,
            selected: 0,
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn status(&self) -> &ListStatus {
        &self.status
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_loading(&self) -> bool {
        self.status == ListStatus::Loading
    }

    /// Start a refresh, returning the generation the fetch belongs to
    pub fn begin_refresh(&mut self) -> u64 {
        self.generation += 1;
        self.status = ListStatus::Loading;
        self.generation
    }

    /// Apply a fetch result; returns `false` when it was stale and ignored
    pub fn complete(&mut self, generation: u64, result: Result<Vec<Entity>, String>) -> bool {
        if generation != self.generation {
            tracing::debug!(
                "Dropping stale {} list (generation {} < {})",
                self.kind,
                generation,
                self.generation
            );
            return false;
        }
        match result {
            Ok(records) => {
                self.records = records;
                self.status = ListStatus::Loaded;
                self.selected = self.selected.min(self.records.len().saturating_sub(1));
            }
            Err(message) => {
                self.records.clear();
                self.selected = 0;
                self.status = ListStatus::Errored(message);
            }
        }
        true
    }

    /// Records of the last successful fetch
    pub fn records(&self) -> &[Entity] {
        &self.records
    }

    /// Record count, once loaded
    pub fn count(&self) -> Option<usize> {
        match self.status {
            ListStatus::Loaded => Some(self.records.len()),
            _ => None,
        }
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected(&self) -> Option<&Entity> {
        self.records.get(self.selected)
    }

    /// Move the selection by `delta`, clamped to the list
    pub fn select_by(&mut self, delta: isize) {
        if self.records.is_empty() {
            self.selected = 0;
            return;
        }
        let last = self.records.len() as isize - 1;
        self.selected = (self.selected as isize + delta).clamp(0, last) as usize;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use estate_core::entity::Testimonial;

    fn testimonial(id: &str) -> Entity {
        Entity::Testimonial(Testimonial {
            id: id.to_string(),
            name: format!("Client {}", id),
            ..Default::default()
        })
    }

    #[test]
    fn test_state_machine() {
        let mut list = ListView::new(EntityKind::Testimonial);
        assert_eq!(list.status(), &ListStatus::Idle);

        let generation = list.begin_refresh();
        assert!(list.is_loading());
        assert!(list.complete(generation, Ok(vec![testimonial("1")])));
        assert_eq!(list.status(), &ListStatus::Loaded);
        assert_eq!(list.count(), Some(1));

        let generation = list.begin_refresh();
        assert!(list.complete(generation, Err("boom".into())));
        assert_eq!(list.status(), &ListStatus::Errored("boom".into()));
        assert_eq!(list.count(), None);
    }

    #[test]
    fn test_stale_completion_dropped() {
        let mut list = ListView::new(EntityKind::Testimonial);
        let old = list.begin_refresh();
        let new = list.begin_refresh();

        assert!(!list.complete(old, Ok(vec![testimonial("old")])));
        assert!(list.is_loading());

        let records = vec![testimonial("a"), testimonial("b")];
        assert!(list.complete(new, Ok(records)));
        assert_eq!(list.records().len(), 2);
    }

    #[test]
    fn test_selection_clamped_after_shrink() {
        let mut list = ListView::new(EntityKind::Testimonial);
        let g = list.begin_refresh();
        let records = vec![testimonial("1"), testimonial("2"), testimonial("3")];
        list.complete(g, Ok(records));
        list.select_by(10);
        assert_eq!(list.selected_index(), 2);

        let g = list.begin_refresh();
        list.complete(g, Ok(vec![testimonial("1")]));
        assert_eq!(list.selected().unwrap().id(), "1");

        list.select_by(-5);
        assert_eq!(list.selected_index(), 0);
    }
}
