use inventory_core::{Item, ItemId, NormalizedItem, RequestId};

use crate::StoreError;

/// The five backend actions, used for routing and error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreAction {
    List,
    Get,
    Create,
    Update,
    Delete,
}

impl StoreAction {
    /// Whether the request URL names one item, so a 404 means "no such item".
    pub fn addresses_item(self) -> bool {
        matches!(
            self,
            StoreAction::Get | StoreAction::Update | StoreAction::Delete
        )
    }

    /// Whether the request carries an item payload the backend may refuse.
    pub fn sends_payload(self) -> bool {
        matches!(self, StoreAction::Create | StoreAction::Update)
    }

    pub fn method(self) -> &'static str {
        match self {
            StoreAction::List | StoreAction::Get => "GET",
            StoreAction::Create => "POST",
            StoreAction::Update => "PUT",
            StoreAction::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StoreRequest {
    List,
    Get {
        item_id: ItemId,
    },
    Create {
        payload: NormalizedItem,
    },
    Update {
        item_id: ItemId,
        payload: NormalizedItem,
    },
    Delete {
        item_id: ItemId,
    },
}

impl StoreRequest {
    pub fn action(&self) -> StoreAction {
        match self {
            StoreRequest::List => StoreAction::List,
            StoreRequest::Get { .. } => StoreAction::Get,
            StoreRequest::Create { .. } => StoreAction::Create,
            StoreRequest::Update { .. } => StoreAction::Update,
            StoreRequest::Delete { .. } => StoreAction::Delete,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StoreOutcome {
    Listed(Result<Vec<Item>, StoreError>),
    Fetched {
        item_id: ItemId,
        result: Result<Item, StoreError>,
    },
    Saved(Result<Item, StoreError>),
    Deleted(Result<(), StoreError>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct EngineEvent {
    pub request_id: RequestId,
    pub outcome: StoreOutcome,
}
