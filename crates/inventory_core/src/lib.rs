//! Inventory core: pure state machine, form validation and list derivation.
mod effect;
mod failure;
mod form;
mod item;
mod list_view;
mod msg;
mod state;
mod update;
mod validate;
mod view_model;

pub use effect::Effect;
pub use failure::{FailureKind, RequestFailure};
pub use form::{DialogKind, FormController, FormMode, FormPhase, Operation, ResultDialog, Submission};
pub use item::{Item, ItemId, NormalizedItem};
pub use list_view::{derive_view, DerivedView, ListViewState, SortKey, PAGE_SIZE};
pub use msg::Msg;
pub use state::{AppState, RequestId, Route};
pub use update::update;
pub use validate::{
    validate, Field, FieldError, FieldErrors, RawFormInput, Rule, DESCRIPTION_MAX_CHARS,
    NAME_MAX_CHARS, PRICE_MAX,
};
pub use view_model::{
    AppViewModel, DetailStatus, DetailView, FormView, ItemCard, ListStatus, ListView, ScreenView,
};
