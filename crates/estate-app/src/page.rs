//! One management page: a list of records next to the form editing one of them

use estate_core::{Entity, EntityKind, FieldKind};

use crate::forms::{EntityForm, FieldPath, FormItem};
use crate::list_view::ListView;

/// Top-level screens, in header tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Dashboard,
    Collection(EntityKind),
    Chat,
}

impl Page {
    pub fn all() -> Vec<Page> {
        let mut pages = vec![Page::Dashboard];
        pages.extend(EntityKind::ALL.into_iter().map(Page::Collection));
        pages.push(Page::Chat);
        pages
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Collection(kind) => kind.title(),
            Page::Chat => "Assistant",
        }
    }

    pub fn index(&self) -> usize {
        Page::all().iter().position(|p| p == self).unwrap_or(0)
    }

    /// Page `offset` tabs away, wrapping around
    pub fn cycle(&self, offset: isize) -> Page {
        let pages = Page::all();
        let len = pages.len() as isize;
        let index = (self.index() as isize + offset).rem_euclid(len) as usize;
        pages[index]
    }
}

/// Which half of a page has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageFocus {
    #[default]
    List,
    Form,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmitStatus {
    #[default]
    Idle,
    Saving,
    Failed(String),
}

/// Text being typed into a field before it is committed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditBuffer {
    pub path: FieldPath,
    pub kind: FieldKind,
    pub text: String,
}

/// Informational or error line shown under the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Error(String),
}

#[derive(Debug, Clone)]
pub struct PageState {
    pub kind: EntityKind,
    pub list: ListView,
    pub form: EntityForm,
    /// Id of the record being edited, `None` in create mode
    pub editing: Option<String>,
    /// Id of the record whose full representation is being fetched
    pub loading_record: Option<String>,
    pub submit: SubmitStatus,
    pub focus: PageFocus,
    pub selected_field: usize,
    pub edit: Option<EditBuffer>,
    pub notice: Option<Notice>,
    /// Form changed since it was created or hydrated
    pub dirty: bool,
    /// Bumped whenever `form` is replaced; submissions carry it so a late
    /// completion only resets the form it was sent from
    pub form_generation: u64,
}

impl PageState {
    pub fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            list: ListView::new(kind),
            form: EntityForm::empty(kind),
            editing: None,
            loading_record: None,
            submit: SubmitStatus::Idle,
            focus: PageFocus::List,
            selected_field: 0,
            edit: None,
            notice: None,
            dirty: false,
            form_generation: 0,
        }
    }

    pub fn is_saving(&self) -> bool {
        self.submit == SubmitStatus::Saving
    }

    /// Back to an empty form in create mode
    pub fn reset_form(&mut self) {
        self.replace_form(EntityForm::empty(self.kind), None);
        self.loading_record = None;
    }

    /// Edit mode for a fetched record
    pub fn load_record(&mut self, entity: &Entity, id: String) {
        self.replace_form(EntityForm::hydrate(entity), Some(id));
        self.focus = PageFocus::Form;
    }

    fn replace_form(&mut self, form: EntityForm, editing: Option<String>) {
        self.form = form;
        self.editing = editing;
        self.selected_field = 0;
        self.edit = None;
        self.dirty = false;
        self.form_generation += 1;
    }

    pub fn selected_item(&self) -> Option<FormItem> {
        self.form.items().into_iter().nth(self.selected_field)
    }

    pub fn select_field_by(&mut self, delta: isize) {
        let count = self.form.items().len();
        if count == 0 {
            self.selected_field = 0;
            return;
        }
        let last = count as isize - 1;
        self.selected_field = (self.selected_field as isize + delta).clamp(0, last) as usize;
    }

    /// Select the first item matching `predicate`, if any
    pub fn select_field_where(&mut self, predicate: impl Fn(&FieldPath) -> bool) {
        if let Some(index) = self.form.items().iter().position(|i| predicate(&i.path)) {
            self.selected_field = index;
        } else {
            self.clamp_selection();
        }
    }

    pub fn clamp_selection(&mut self) {
        let count = self.form.items().len();
        self.selected_field = self.selected_field.min(count.saturating_sub(1));
    }

    pub fn mode_label(&self) -> String {
        match &self.editing {
            Some(id) => format!("Editing {} {}", self.kind.singular(), id),
            None => format!("New {}", self.kind.singular()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use estate_core::entity::Testimonial;
    use estate_core::FieldValue;

    #[test]
    fn test_page_cycle_wraps() {
        assert_eq!(Page::Dashboard.cycle(-1), Page::Chat);
        assert_eq!(Page::Chat.cycle(1), Page::Dashboard);
        assert_eq!(
            Page::Dashboard.cycle(1),
            Page::Collection(EntityKind::Banner)
        );
        assert_eq!(Page::all().len(), EntityKind::ALL.len() + 2);
    }

    #[test]
    fn test_reset_form_clears_edit_mode() {
        let mut page = PageState::new(EntityKind::Testimonial);
        page.editing = Some("t1".into());
        page.form.apply(&FieldPath::Scalar("name"), FieldValue::text("Asha"));
        page.dirty = true;
        page.selected_field = 3;

        page.reset_form();

        assert_eq!(page.editing, None);
        assert_eq!(page.form, EntityForm::empty(EntityKind::Testimonial));
        assert!(!page.dirty);
        assert_eq!(page.selected_field, 0);
    }

    #[test]
    fn test_every_form_replacement_bumps_generation() {
        let mut page = PageState::new(EntityKind::Testimonial);
        let start = page.form_generation;

        page.reset_form();
        assert_eq!(page.form_generation, start + 1);

        let entity = Entity::Testimonial(Testimonial {
            id: "t2".into(),
            name: "Ravi".into(),
            ..Default::default()
        });
        page.load_record(&entity, "t2".into());
        assert_eq!(page.form_generation, start + 2);
        assert_eq!(page.editing.as_deref(), Some("t2"));
        assert_eq!(page.focus, PageFocus::Form);
    }

    #[test]
    fn test_field_selection_clamped() {
        let mut page = PageState::new(EntityKind::Banner);
        page.select_field_by(100);
        assert_eq!(page.selected_field, page.form.items().len() - 1);
        page.select_field_by(-100);
        assert_eq!(page.selected_field, 0);
    }

    #[test]
    fn test_mode_label() {
        let mut page = PageState::new(EntityKind::Blog);
        assert_eq!(page.mode_label(), "New blog post");
        page.editing = Some("x1".into());
        assert_eq!(page.mode_label(), "Editing blog post x1");
    }
}
