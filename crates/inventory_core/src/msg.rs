use crate::{Field, Item, ItemId, RequestFailure, RequestId, Route, SortKey};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Application start: show the list and load it.
    Started,
    /// User followed a link or pressed back.
    Navigate(Route),
    /// User edited the search box.
    SearchChanged(String),
    /// User picked a sort order.
    SortChanged(SortKey),
    /// User picked a page in the pagination control.
    PageChanged(usize),
    /// User asked to refetch the list.
    ReloadClicked,
    /// Store completion for a list load.
    ItemsLoaded {
        request_id: RequestId,
        result: Result<Vec<Item>, RequestFailure>,
    },
    /// Store completion for a single-item load.
    ItemLoaded {
        request_id: RequestId,
        item_id: ItemId,
        result: Result<Item, RequestFailure>,
    },
    /// User typed into a form field.
    FieldEdited { field: Field, value: String },
    /// User submitted the create form or the update editor.
    SubmitClicked,
    /// User opened the update editor on the detail screen.
    EditClicked,
    /// User asked to delete the displayed item.
    DeleteClicked,
    /// User confirmed the pending deletion.
    DeleteConfirmed,
    /// User cancelled the delete confirmation or closed the editor.
    CancelClicked,
    /// User dismissed the result dialog.
    DialogClosed,
    /// Store completion for a create or update.
    ItemSaved {
        request_id: RequestId,
        result: Result<Item, RequestFailure>,
    },
    /// Store completion for a delete.
    ItemDeleted {
        request_id: RequestId,
        result: Result<(), RequestFailure>,
    },
}
