use std::sync::{mpsc, Arc};

use inventory_core::{Effect, FailureKind, Msg, RequestFailure, RequestId};
use inventory_engine::{
    EngineError, EngineEvent, EngineHandle, EventSink, StoreError, StoreOutcome, StoreRequest,
    StoreSettings,
};
use inventory_logging::{inventory_info, inventory_warn};

use super::app::AppEvent;

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(settings: StoreSettings, events: mpsc::Sender<AppEvent>) -> Result<Self, EngineError> {
        let sink = Arc::new(MsgSink { events });
        let engine = EngineHandle::new(settings, sink)?;
        Ok(Self { engine })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            let request_id = effect.request_id();
            let request = store_request(effect);
            inventory_info!(
                "Dispatch request_id={} action={:?}",
                request_id,
                request.action()
            );
            self.engine.submit(request_id, request);
        }
    }
}

fn store_request(effect: Effect) -> StoreRequest {
    match effect {
        Effect::LoadItems { .. } => StoreRequest::List,
        Effect::LoadItem { item_id, .. } => StoreRequest::Get { item_id },
        Effect::CreateItem { payload, .. } => StoreRequest::Create { payload },
        Effect::UpdateItem {
            item_id, payload, ..
        } => StoreRequest::Update { item_id, payload },
        Effect::DeleteItem { item_id, .. } => StoreRequest::Delete { item_id },
    }
}

/// Forwards engine completions into the app's message loop.
struct MsgSink {
    events: mpsc::Sender<AppEvent>,
}

impl EventSink for MsgSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.events.send(AppEvent::Msg(engine_event_to_msg(event)));
    }
}

fn engine_event_to_msg(event: EngineEvent) -> Msg {
    let request_id = event.request_id;
    match event.outcome {
        StoreOutcome::Listed(result) => Msg::ItemsLoaded {
            request_id,
            result: result.map_err(|err| map_failure(request_id, err)),
        },
        StoreOutcome::Fetched { item_id, result } => Msg::ItemLoaded {
            request_id,
            item_id,
            result: result.map_err(|err| map_failure(request_id, err)),
        },
        StoreOutcome::Saved(result) => Msg::ItemSaved {
            request_id,
            result: result.map_err(|err| map_failure(request_id, err)),
        },
        StoreOutcome::Deleted(result) => Msg::ItemDeleted {
            request_id,
            result: result.map_err(|err| map_failure(request_id, err)),
        },
    }
}

fn map_failure(request_id: RequestId, err: StoreError) -> RequestFailure {
    inventory_warn!("Request {} failed: {:?}", request_id, err);
    let kind = match &err {
        StoreError::NotFound(_) => FailureKind::NotFound,
        StoreError::ValidationRejected { .. } => FailureKind::Rejected,
        StoreError::Server { status, .. } => FailureKind::Server { status: *status },
        StoreError::Network(_) => FailureKind::Network,
    };
    RequestFailure::new(kind, err.to_string())
}
