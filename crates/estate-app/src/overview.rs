//! Dashboard landing page: every collection with its record count

use std::collections::BTreeMap;

use estate_core::EntityKind;

use crate::list_view::{ListStatus, ListView};

#[derive(Debug, Clone)]
pub struct Overview {
    lists: BTreeMap<EntityKind, ListView>,
    selected: usize,
}

impl Default for Overview {
    fn default() -> Self {
        Self::new()
    }
}

impl Overview {
    pub fn new() -> Self {
        Self {
            lists: EntityKind::ALL
                .into_iter()
                .map(|kind| (kind, ListView::new(kind)))
                .collect(),
            selected: 0,
        }
    }

    pub fn list(&self, kind: EntityKind) -> Option<&ListView> {
        self.lists.get(&kind)
    }

    pub fn list_mut(&mut self, kind: EntityKind) -> &mut ListView {
        self.lists
            .entry(kind)
            .or_insert_with(|| ListView::new(kind))
    }

    /// Lists in tab order
    pub fn lists(&self) -> impl Iterator<Item = &ListView> {
        EntityKind::ALL
            .into_iter()
            .filter_map(move |kind| self.lists.get(&kind))
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_kind(&self) -> EntityKind {
        EntityKind::ALL[self.selected.min(EntityKind::ALL.len() - 1)]
    }

    pub fn select_by(&mut self, delta: isize) {
        let last = EntityKind::ALL.len() as isize - 1;
        self.selected = (self.selected as isize + delta).clamp(0, last) as usize;
    }

    /// Sum of all loaded counts
    pub fn total_records(&self) -> usize {
        self.lists.values().filter_map(ListView::count).sum()
    }

    /// Collections whose last fetch failed
    pub fn failed(&self) -> Vec<EntityKind> {
        self.lists
            .values()
            .filter(|list| matches!(list.status(), ListStatus::Errored(_)))
            .map(ListView::kind)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use estate_core::entity::HomeBanner;
    use estate_core::Entity;

    #[test]
    fn test_counts_only_loaded_lists() {
        let mut overview = Overview::new();
        let g = overview.list_mut(EntityKind::Banner).begin_refresh();
        overview.list_mut(EntityKind::Banner).complete(
            g,
            Ok(vec![Entity::Banner(HomeBanner::default()); 3]),
        );
        overview.list_mut(EntityKind::Blog).begin_refresh();
        let g = overview.list_mut(EntityKind::Plot).begin_refresh();
        overview
            .list_mut(EntityKind::Plot)
            .complete(g, Err("offline".into()));

        assert_eq!(overview.total_records(), 3);
        assert_eq!(overview.failed(), vec![EntityKind::Plot]);
        let blogs = overview.list(EntityKind::Blog);
        assert_eq!(blogs.and_then(ListView::count), None);
    }

    #[test]
    fn test_selection_follows_tab_order() {
        let mut overview = Overview::new();
        assert_eq!(overview.selected_kind(), EntityKind::Banner);
        overview.select_by(100);
        assert_eq!(overview.selected_kind(), EntityKind::Plot);
        assert_eq!(overview.lists().count(), EntityKind::ALL.len());
    }
}
