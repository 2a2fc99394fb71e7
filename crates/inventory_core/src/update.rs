use crate::{AppState, Effect, Msg, Route};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Started => state.navigate(Route::List),
        Msg::Navigate(route) => state.navigate(route),
        Msg::SearchChanged(term) => {
            state.set_search_term(term);
            Vec::new()
        }
        Msg::SortChanged(sort_key) => {
            state.set_sort_key(sort_key);
            Vec::new()
        }
        Msg::PageChanged(page) => {
            state.set_page(page);
            Vec::new()
        }
        Msg::ReloadClicked => state.reload_list(),
        Msg::ItemsLoaded { request_id, result } => {
            state.apply_items_loaded(request_id, result);
            Vec::new()
        }
        Msg::ItemLoaded {
            request_id,
            item_id,
            result,
        } => {
            state.apply_item_loaded(request_id, item_id, result);
            Vec::new()
        }
        Msg::FieldEdited { field, value } => {
            state.edit_field(field, value);
            Vec::new()
        }
        Msg::SubmitClicked => state.submit_form(),
        Msg::EditClicked => {
            state.open_editor();
            Vec::new()
        }
        Msg::DeleteClicked => {
            state.request_delete();
            Vec::new()
        }
        Msg::DeleteConfirmed => state.confirm_delete(),
        Msg::CancelClicked => {
            state.cancel();
            Vec::new()
        }
        Msg::DialogClosed => state.close_dialog(),
        Msg::ItemSaved { request_id, result } => {
            state.apply_item_saved(request_id, result);
            Vec::new()
        }
        Msg::ItemDeleted { request_id, result } => {
            state.apply_item_deleted(request_id, result);
            Vec::new()
        }
    };

    (state, effects)
}
