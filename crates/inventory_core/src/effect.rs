use crate::form::{Operation, Submission};
use crate::{ItemId, NormalizedItem, RequestId};

/// Store work requested by `update`; the platform executes it and feeds the
/// outcome back as a `Msg` carrying the same `request_id`.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    LoadItems {
        request_id: RequestId,
    },
    LoadItem {
        request_id: RequestId,
        item_id: ItemId,
    },
    CreateItem {
        request_id: RequestId,
        payload: NormalizedItem,
    },
    UpdateItem {
        request_id: RequestId,
        item_id: ItemId,
        payload: NormalizedItem,
    },
    DeleteItem {
        request_id: RequestId,
        item_id: ItemId,
    },
}

impl Effect {
    pub(crate) fn from_submission(request_id: RequestId, submission: Submission) -> Self {
        match submission {
            Submission::Save {
                operation: Operation::Update(item_id),
                payload,
            } => Effect::UpdateItem {
                request_id,
                item_id,
                payload,
            },
            Submission::Save { payload, .. } => Effect::CreateItem {
                request_id,
                payload,
            },
            Submission::Delete { item_id } => Effect::DeleteItem {
                request_id,
                item_id,
            },
        }
    }

    pub fn request_id(&self) -> RequestId {
        match self {
            Effect::LoadItems { request_id }
            | Effect::LoadItem { request_id, .. }
            | Effect::CreateItem { request_id, .. }
            | Effect::UpdateItem { request_id, .. }
            | Effect::DeleteItem { request_id, .. } => *request_id,
        }
    }
}
