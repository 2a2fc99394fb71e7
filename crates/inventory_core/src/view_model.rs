use crate::form::{FormController, FormPhase, Operation, ResultDialog};
use crate::list_view::derive_view;
use crate::state::{DetailLoad, DetailScreen, ListLoad, ListScreen, Screen};
use crate::{AppState, Field, FormMode, Item, ItemId, Route, SortKey};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppViewModel {
    pub route: Route,
    pub screen: ScreenView,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenView {
    List(ListView),
    Create(FormView),
    Detail(DetailView),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListStatus {
    Loading,
    Failed { details: String },
    /// Loaded, but nothing matches the search.
    Empty,
    Ready,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    pub status: ListStatus,
    pub search_term: String,
    pub sort_key: SortKey,
    pub cards: Vec<ItemCard>,
    pub current_page: usize,
    pub total_pages: usize,
    pub show_pagination: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemCard {
    pub id: ItemId,
    pub title: String,
    pub description: String,
    pub price: String,
}

impl From<&Item> for ItemCard {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id,
            title: item.name.clone(),
            description: item.description.clone(),
            price: item.display_price(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub mode: FormMode,
    pub name: String,
    pub description: String,
    pub price: String,
    pub field_errors: Vec<(Field, &'static str)>,
    pub submit_enabled: bool,
    pub submitting: bool,
    pub dialog: Option<ResultDialog>,
}

impl From<&FormController> for FormView {
    fn from(form: &FormController) -> Self {
        let input = form.input();
        let submitting = matches!(
            form.phase(),
            FormPhase::Submitting {
                operation: Operation::Create | Operation::Update(_),
                ..
            }
        );
        Self {
            mode: form.mode(),
            name: input.name.clone(),
            description: input.description.clone(),
            price: input.price.clone(),
            field_errors: form
                .errors()
                .iter()
                .map(|(field, err)| (field, err.message))
                .collect(),
            submit_enabled: form.is_idle(),
            submitting,
            dialog: form.dialog().cloned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailStatus {
    Loading,
    NotFound,
    Failed {
        details: String,
    },
    Ready {
        card: ItemCard,
        /// Present while the update editor is open.
        editor: Option<FormView>,
        /// Confirmation prompt while a delete awaits confirmation.
        confirm_delete: Option<String>,
        deleting: bool,
        dialog: Option<ResultDialog>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub item_id: ItemId,
    pub status: DetailStatus,
}

impl AppViewModel {
    pub(crate) fn from_state(state: &AppState) -> Self {
        let screen = match &state.screen {
            Screen::List(list) => ScreenView::List(list_view(list)),
            Screen::Create(form) => ScreenView::Create(FormView::from(form)),
            Screen::Detail(detail) => ScreenView::Detail(detail_view(detail)),
        };
        Self {
            route: state.route(),
            screen,
        }
    }
}

fn list_view(list: &ListScreen) -> ListView {
    let derived = derive_view(&list.view);
    let status = match &list.load {
        ListLoad::Loading { .. } => ListStatus::Loading,
        ListLoad::Failed(failure) => ListStatus::Failed {
            details: failure.message.clone(),
        },
        ListLoad::Ready if derived.matching_items == 0 => ListStatus::Empty,
        ListLoad::Ready => ListStatus::Ready,
    };
    let ready = status == ListStatus::Ready;
    ListView {
        status,
        search_term: list.view.search_term.clone(),
        sort_key: list.view.sort_key,
        cards: if ready {
            derived.visible_items.iter().map(ItemCard::from).collect()
        } else {
            Vec::new()
        },
        current_page: derived.current_page,
        total_pages: derived.total_pages,
        show_pagination: ready && derived.shows_pagination(),
    }
}

fn detail_view(detail: &DetailScreen) -> DetailView {
    let status = match &detail.load {
        DetailLoad::Loading { .. } => DetailStatus::Loading,
        DetailLoad::Failed(failure) if failure.is_not_found() => DetailStatus::NotFound,
        DetailLoad::Failed(failure) => DetailStatus::Failed {
            details: failure.message.clone(),
        },
        DetailLoad::Ready {
            item,
            form,
            editor_open,
        } => DetailStatus::Ready {
            card: ItemCard::from(item),
            editor: editor_open.then(|| FormView::from(form)),
            confirm_delete: (*form.phase() == FormPhase::ConfirmPending).then(|| {
                format!(
                    "Are you sure you want to delete \"{}\"? This action cannot be undone.",
                    item.name
                )
            }),
            deleting: matches!(
                form.phase(),
                FormPhase::Submitting {
                    operation: Operation::Delete(_),
                    ..
                }
            ),
            dialog: form.dialog().cloned(),
        },
    };
    DetailView {
        item_id: detail.item_id,
        status,
    }
}
