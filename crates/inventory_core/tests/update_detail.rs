use inventory_core::{
    update, AppState, DetailStatus, DialogKind, Effect, FailureKind, Field, Item, Msg,
    NormalizedItem, RequestFailure, Route, ScreenView,
};

fn init_logging() {
    inventory_logging::initialize_for_tests();
}

fn lamp() -> Item {
    Item {
        id: 1,
        name: "Lamp".to_string(),
        description: "Desk lamp".to_string(),
        price: Some(20.0),
    }
}

fn detail_status(state: &AppState) -> DetailStatus {
    match state.view().screen {
        ScreenView::Detail(detail) => detail.status,
        other => panic!("expected detail screen, got {other:?}"),
    }
}

fn opened(item: Item) -> AppState {
    let (state, effects) = update(AppState::new(), Msg::Navigate(Route::Item(item.id)));
    assert_eq!(
        effects,
        vec![Effect::LoadItem {
            request_id: 1,
            item_id: item.id
        }]
    );
    assert_eq!(detail_status(&state), DetailStatus::Loading);
    let item_id = item.id;
    update(
        state,
        Msg::ItemLoaded {
            request_id: 1,
            item_id,
            result: Ok(item),
        },
    )
    .0
}

#[test]
fn loaded_item_is_shown() {
    init_logging();
    let state = opened(lamp());
    let DetailStatus::Ready {
        card,
        editor,
        confirm_delete,
        deleting,
        dialog,
    } = detail_status(&state)
    else {
        panic!("item should be ready");
    };
    assert_eq!(card.title, "Lamp");
    assert_eq!(card.price, "20.00");
    assert!(editor.is_none());
    assert!(confirm_delete.is_none());
    assert!(!deleting);
    assert!(dialog.is_none());
}

#[test]
fn missing_item_shows_not_found() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::Navigate(Route::Item(999)));
    let (state, _) = update(
        state,
        Msg::ItemLoaded {
            request_id: 1,
            item_id: 999,
            result: Err(RequestFailure::new(FailureKind::NotFound, "not found")),
        },
    );
    assert_eq!(detail_status(&state), DetailStatus::NotFound);
}

#[test]
fn other_load_failures_show_details() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::Navigate(Route::Item(3)));
    let (state, _) = update(
        state,
        Msg::ItemLoaded {
            request_id: 1,
            item_id: 3,
            result: Err(RequestFailure::new(
                FailureKind::Server { status: 500 },
                "Database error: locked",
            )),
        },
    );
    assert_eq!(
        detail_status(&state),
        DetailStatus::Failed {
            details: "Database error: locked".to_string()
        }
    );
}

#[test]
fn response_for_previous_item_is_ignored() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::Navigate(Route::Item(1)));
    let (state, effects) = update(state, Msg::Navigate(Route::Item(2)));
    assert_eq!(
        effects,
        vec![Effect::LoadItem {
            request_id: 2,
            item_id: 2
        }]
    );

    let (state, _) = update(
        state,
        Msg::ItemLoaded {
            request_id: 1,
            item_id: 1,
            result: Ok(lamp()),
        },
    );
    assert_eq!(detail_status(&state), DetailStatus::Loading);
    assert_eq!(state.route(), Route::Item(2));
}

#[test]
fn delete_requires_confirmation() {
    init_logging();
    let state = opened(lamp());
    let (state, _) = update(state, Msg::DeleteClicked);
    let DetailStatus::Ready { confirm_delete, .. } = detail_status(&state) else {
        panic!("item should be ready");
    };
    assert_eq!(
        confirm_delete.as_deref(),
        Some("Are you sure you want to delete \"Lamp\"? This action cannot be undone.")
    );

    let (state, effects) = update(state, Msg::CancelClicked);
    assert!(effects.is_empty());
    let DetailStatus::Ready { confirm_delete, .. } = detail_status(&state) else {
        panic!("item should be ready");
    };
    assert!(confirm_delete.is_none());

    // Confirming without a pending prompt does nothing.
    let (_state, effects) = update(state, Msg::DeleteConfirmed);
    assert!(effects.is_empty());
}

#[test]
fn confirmed_delete_returns_to_list() {
    init_logging();
    let state = opened(lamp());
    let (state, _) = update(state, Msg::DeleteClicked);
    let (state, effects) = update(state, Msg::DeleteConfirmed);
    assert_eq!(
        effects,
        vec![Effect::DeleteItem {
            request_id: 2,
            item_id: 1
        }]
    );
    let DetailStatus::Ready { deleting, .. } = detail_status(&state) else {
        panic!("item should be ready");
    };
    assert!(deleting);

    let (state, _) = update(
        state,
        Msg::ItemDeleted {
            request_id: 2,
            result: Ok(()),
        },
    );
    let DetailStatus::Ready { dialog, .. } = detail_status(&state) else {
        panic!("item should be ready");
    };
    let dialog = dialog.expect("result dialog");
    assert_eq!(dialog.kind, DialogKind::Success);
    assert_eq!(dialog.message, "Item deleted successfully!");

    let (state, effects) = update(state, Msg::DialogClosed);
    assert_eq!(state.route(), Route::List);
    assert_eq!(effects, vec![Effect::LoadItems { request_id: 3 }]);
}

#[test]
fn failed_delete_returns_to_idle() {
    init_logging();
    let state = opened(lamp());
    let (state, _) = update(state, Msg::DeleteClicked);
    let (state, _) = update(state, Msg::DeleteConfirmed);
    let (state, _) = update(
        state,
        Msg::ItemDeleted {
            request_id: 2,
            result: Err(RequestFailure::new(FailureKind::NotFound, "Item not found")),
        },
    );
    let DetailStatus::Ready { dialog, .. } = detail_status(&state) else {
        panic!("item should be ready");
    };
    assert_eq!(
        dialog.expect("result dialog").message,
        "Error deleting item: Item not found"
    );

    let (state, effects) = update(state, Msg::DialogClosed);
    assert!(effects.is_empty());
    assert_eq!(state.route(), Route::Item(1));
    let DetailStatus::Ready {
        dialog,
        confirm_delete,
        deleting,
        ..
    } = detail_status(&state)
    else {
        panic!("item should be ready");
    };
    assert!(dialog.is_none());
    assert!(confirm_delete.is_none());
    assert!(!deleting);
}

#[test]
fn editor_updates_item_and_closes() {
    init_logging();
    let state = opened(lamp());
    let (state, _) = update(state, Msg::EditClicked);
    let DetailStatus::Ready { editor, .. } = detail_status(&state) else {
        panic!("item should be ready");
    };
    let editor = editor.expect("editor open");
    assert_eq!(editor.name, "Lamp");
    assert_eq!(editor.description, "Desk lamp");
    assert_eq!(editor.price, "20");

    // Delete is unavailable while the editor is open.
    let (state, _) = update(state, Msg::DeleteClicked);

    let (state, _) = update(
        state,
        Msg::FieldEdited {
            field: Field::Price,
            value: "25.5".to_string(),
        },
    );
    let (state, effects) = update(state, Msg::SubmitClicked);
    assert_eq!(
        effects,
        vec![Effect::UpdateItem {
            request_id: 2,
            item_id: 1,
            payload: NormalizedItem {
                name: "Lamp".to_string(),
                description: "Desk lamp".to_string(),
                price: 25.5,
            },
        }]
    );

    let updated = Item {
        price: Some(25.5),
        ..lamp()
    };
    let (state, _) = update(
        state,
        Msg::ItemSaved {
            request_id: 2,
            result: Ok(updated),
        },
    );
    let DetailStatus::Ready {
        card,
        editor,
        dialog,
        ..
    } = detail_status(&state)
    else {
        panic!("item should be ready");
    };
    assert_eq!(card.price, "25.50");
    assert!(editor.is_none());
    assert_eq!(
        dialog.expect("result dialog").message,
        "Item updated successfully!"
    );

    let (state, effects) = update(state, Msg::DialogClosed);
    assert_eq!(state.route(), Route::List);
    assert_eq!(effects, vec![Effect::LoadItems { request_id: 3 }]);
}

#[test]
fn rejected_update_keeps_editor_input() {
    init_logging();
    let state = opened(lamp());
    let (state, _) = update(state, Msg::EditClicked);
    let (state, _) = update(
        state,
        Msg::FieldEdited {
            field: Field::Name,
            value: "Floor lamp".to_string(),
        },
    );
    let (state, _) = update(state, Msg::SubmitClicked);
    let (state, _) = update(
        state,
        Msg::ItemSaved {
            request_id: 2,
            result: Err(RequestFailure::new(FailureKind::Rejected, "No fields to update")),
        },
    );
    let (state, _) = update(state, Msg::DialogClosed);

    let DetailStatus::Ready { card, editor, .. } = detail_status(&state) else {
        panic!("item should be ready");
    };
    assert_eq!(card.title, "Lamp");
    let editor = editor.expect("editor still open");
    assert_eq!(editor.name, "Floor lamp");
    assert!(editor.submit_enabled);

    let (state, _) = update(state, Msg::CancelClicked);
    let DetailStatus::Ready { editor, .. } = detail_status(&state) else {
        panic!("item should be ready");
    };
    assert!(editor.is_none());
}

#[test]
fn clearing_description_sends_empty_string_on_update() {
    init_logging();
    let state = opened(lamp());
    let (state, _) = update(state, Msg::EditClicked);
    let (state, _) = update(
        state,
        Msg::FieldEdited {
            field: Field::Description,
            value: String::new(),
        },
    );
    let (_, effects) = update(state, Msg::SubmitClicked);

    let [Effect::UpdateItem {
        item_id, payload, ..
    }] = effects.as_slice()
    else {
        panic!("expected one update, got {effects:?}");
    };
    assert_eq!(*item_id, 1);
    assert_eq!(
        serde_json::to_value(payload).unwrap(),
        serde_json::json!({"name": "Lamp", "description": "", "price": 20.0})
    );
}
