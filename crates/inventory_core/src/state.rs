use crate::form::{DialogKind, FormController, FormPhase};
use crate::list_view::{ListViewState, SortKey};
use crate::validate::Field;
use crate::view_model::AppViewModel;
use crate::{Effect, Item, ItemId, RequestFailure};

/// Identifies one store request; responses carry it back so stale ones can
/// be dropped.
pub type RequestId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    List,
    Create,
    Item(ItemId),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ListLoad {
    Loading { request_id: RequestId },
    Ready,
    Failed(RequestFailure),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ListScreen {
    pub(crate) load: ListLoad,
    pub(crate) view: ListViewState,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum DetailLoad {
    Loading { request_id: RequestId },
    Ready {
        item: Item,
        form: FormController,
        editor_open: bool,
    },
    Failed(RequestFailure),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DetailScreen {
    pub(crate) item_id: ItemId,
    pub(crate) load: DetailLoad,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Screen {
    List(ListScreen),
    Create(FormController),
    Detail(DetailScreen),
}

impl Screen {
    /// A confirmation or result dialog is open and must be answered first.
    fn is_modal(&self) -> bool {
        let form = match self {
            Screen::List(_) => return false,
            Screen::Create(form) => form,
            Screen::Detail(DetailScreen {
                load: DetailLoad::Ready { form, .. },
                ..
            }) => form,
            Screen::Detail(_) => return false,
        };
        form.dialog().is_some() || *form.phase() == FormPhase::ConfirmPending
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub(crate) screen: Screen,
    next_request_id: RequestId,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            screen: Screen::List(ListScreen {
                load: ListLoad::Ready,
                view: ListViewState::default(),
            }),
            next_request_id: 1,
            dirty: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(&self) -> Route {
        match &self.screen {
            Screen::List(_) => Route::List,
            Screen::Create(_) => Route::Create,
            Screen::Detail(detail) => Route::Item(detail.item_id),
        }
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel::from_state(self)
    }

    /// Returns whether anything changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn issue_request_id(&mut self) -> RequestId {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    pub(crate) fn navigate(&mut self, route: Route) -> Vec<Effect> {
        if self.screen.is_modal() {
            return Vec::new();
        }
        self.mark_dirty();
        match route {
            Route::List => self.load_list(ListViewState::default()),
            Route::Create => {
                self.screen = Screen::Create(FormController::for_create());
                Vec::new()
            }
            Route::Item(item_id) => {
                let request_id = self.issue_request_id();
                self.screen = Screen::Detail(DetailScreen {
                    item_id,
                    load: DetailLoad::Loading { request_id },
                });
                vec![Effect::LoadItem {
                    request_id,
                    item_id,
                }]
            }
        }
    }

    fn load_list(&mut self, view: ListViewState) -> Vec<Effect> {
        let request_id = self.issue_request_id();
        self.screen = Screen::List(ListScreen {
            load: ListLoad::Loading { request_id },
            view,
        });
        vec![Effect::LoadItems { request_id }]
    }

    pub(crate) fn reload_list(&mut self) -> Vec<Effect> {
        let Screen::List(list) = &self.screen else {
            return Vec::new();
        };
        if matches!(list.load, ListLoad::Loading { .. }) {
            return Vec::new();
        }
        let view = list.view.clone();
        self.mark_dirty();
        self.load_list(view)
    }

    /// Produces the next list view state from the current one.
    pub(crate) fn change_list_view(
        &mut self,
        change: impl FnOnce(ListViewState) -> ListViewState,
    ) {
        let Screen::List(list) = &mut self.screen else {
            return;
        };
        let next = change(std::mem::take(&mut list.view));
        let changed = next != list.view;
        list.view = next;
        if changed {
            self.mark_dirty();
        }
    }

    pub(crate) fn set_search_term(&mut self, term: String) {
        self.change_list_view(|view| view.with_search_term(term));
    }

    pub(crate) fn set_sort_key(&mut self, sort_key: SortKey) {
        self.change_list_view(|view| view.with_sort_key(sort_key));
    }

    pub(crate) fn set_page(&mut self, page: usize) {
        self.change_list_view(|view| view.with_page(page));
    }

    pub(crate) fn apply_items_loaded(
        &mut self,
        request_id: RequestId,
        result: Result<Vec<Item>, RequestFailure>,
    ) {
        let Screen::List(list) = &mut self.screen else {
            return;
        };
        if list.load != (ListLoad::Loading { request_id }) {
            return;
        }
        match result {
            Ok(items) => {
                list.view = std::mem::take(&mut list.view).with_items(items);
                list.load = ListLoad::Ready;
            }
            Err(failure) => list.load = ListLoad::Failed(failure),
        }
        self.mark_dirty();
    }

    pub(crate) fn apply_item_loaded(
        &mut self,
        request_id: RequestId,
        item_id: ItemId,
        result: Result<Item, RequestFailure>,
    ) {
        let Screen::Detail(detail) = &mut self.screen else {
            return;
        };
        if detail.item_id != item_id || detail.load != (DetailLoad::Loading { request_id }) {
            return;
        }
        detail.load = match result {
            Ok(item) => DetailLoad::Ready {
                form: FormController::for_item(&item),
                item,
                editor_open: false,
            },
            Err(failure) => DetailLoad::Failed(failure),
        };
        self.mark_dirty();
    }

    /// The form accepting input right now: the create form, or the update
    /// editor when it is open.
    fn active_form(&mut self) -> Option<&mut FormController> {
        match &mut self.screen {
            Screen::Create(form) => Some(form),
            Screen::Detail(DetailScreen {
                load:
                    DetailLoad::Ready {
                        form,
                        editor_open: true,
                        ..
                    },
                ..
            }) => Some(form),
            _ => None,
        }
    }

    /// The controller owning dialogs and in-flight requests on this screen.
    fn screen_form(&mut self) -> Option<&mut FormController> {
        match &mut self.screen {
            Screen::Create(form) => Some(form),
            Screen::Detail(DetailScreen {
                load: DetailLoad::Ready { form, .. },
                ..
            }) => Some(form),
            _ => None,
        }
    }

    pub(crate) fn edit_field(&mut self, field: Field, value: String) {
        if self.active_form().is_some_and(|form| form.edit_field(field, value)) {
            self.mark_dirty();
        }
    }

    pub(crate) fn submit_form(&mut self) -> Vec<Effect> {
        let request_id = self.next_request_id;
        let Some(form) = self.active_form() else {
            return Vec::new();
        };
        let was_idle = form.is_idle();
        let submission = form.submit(request_id);
        if was_idle {
            self.mark_dirty();
        }
        match submission {
            Some(submission) => {
                self.next_request_id += 1;
                vec![Effect::from_submission(request_id, submission)]
            }
            None => Vec::new(),
        }
    }

    pub(crate) fn open_editor(&mut self) {
        let Screen::Detail(DetailScreen {
            load:
                DetailLoad::Ready {
                    item,
                    form,
                    editor_open,
                },
            ..
        }) = &mut self.screen
        else {
            return;
        };
        if *editor_open || !form.is_idle() {
            return;
        }
        form.reset_input_from(item);
        *editor_open = true;
        self.mark_dirty();
    }

    pub(crate) fn request_delete(&mut self) {
        let Screen::Detail(DetailScreen {
            load: DetailLoad::Ready {
                form, editor_open, ..
            },
            ..
        }) = &mut self.screen
        else {
            return;
        };
        if !*editor_open && form.request_delete() {
            self.mark_dirty();
        }
    }

    pub(crate) fn confirm_delete(&mut self) -> Vec<Effect> {
        let request_id = self.next_request_id;
        let Some(submission) = self
            .screen_form()
            .and_then(|form| form.confirm_delete(request_id))
        else {
            return Vec::new();
        };
        self.next_request_id += 1;
        self.mark_dirty();
        vec![Effect::from_submission(request_id, submission)]
    }

    /// Cancels the delete confirmation, or closes an idle update editor.
    pub(crate) fn cancel(&mut self) {
        let Screen::Detail(DetailScreen {
            load: DetailLoad::Ready {
                form, editor_open, ..
            },
            ..
        }) = &mut self.screen
        else {
            return;
        };
        let changed = if form.cancel_delete() {
            true
        } else if *editor_open && form.is_idle() {
            *editor_open = false;
            true
        } else {
            false
        };
        if changed {
            self.mark_dirty();
        }
    }

    pub(crate) fn apply_item_saved(
        &mut self,
        request_id: RequestId,
        result: Result<Item, RequestFailure>,
    ) {
        let applied = match &mut self.screen {
            Screen::Create(form) => form.complete(request_id, result.as_ref().map(|_| ())),
            Screen::Detail(DetailScreen {
                load:
                    DetailLoad::Ready {
                        item,
                        form,
                        editor_open,
                    },
                ..
            }) => {
                let applied = form.complete(request_id, result.as_ref().map(|_| ()));
                if applied {
                    if let Ok(updated) = result {
                        *item = updated;
                        *editor_open = false;
                    }
                }
                applied
            }
            _ => false,
        };
        if applied {
            self.mark_dirty();
        }
    }

    pub(crate) fn apply_item_deleted(
        &mut self,
        request_id: RequestId,
        result: Result<(), RequestFailure>,
    ) {
        let Screen::Detail(DetailScreen {
            load: DetailLoad::Ready { form, .. },
            ..
        }) = &mut self.screen
        else {
            return;
        };
        if form.complete(request_id, result.as_ref().map(|_| ())) {
            self.mark_dirty();
        }
    }

    /// Dismisses the result dialog; a success dialog leads back to a freshly
    /// loaded list.
    pub(crate) fn close_dialog(&mut self) -> Vec<Effect> {
        match self.screen_form().and_then(FormController::close_dialog) {
            Some(DialogKind::Success) => {
                self.mark_dirty();
                self.load_list(ListViewState::default())
            }
            Some(DialogKind::Error) => {
                self.mark_dirty();
                Vec::new()
            }
            None => Vec::new(),
        }
    }
}
