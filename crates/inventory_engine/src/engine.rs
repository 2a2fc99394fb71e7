use std::sync::{mpsc, Arc};
use std::thread;

use inventory_core::RequestId;
use inventory_logging::{inventory_debug, inventory_info};

use crate::store::{ItemStore, ReqwestItemStore, StoreSettings};
use crate::{EngineError, EngineEvent, StoreRequest};

/// Receives completed store requests.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

struct EngineCommand {
    request_id: RequestId,
    request: StoreRequest,
}

/// Runs store requests on a background tokio runtime.
///
/// `submit` never blocks; each request runs to completion or failure and its
/// outcome is handed to the sink tagged with the caller's request id.
/// Dropping the handle stops the worker thread.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(settings: StoreSettings, sink: Arc<dyn EventSink>) -> Result<Self, EngineError> {
        let store = Arc::new(ReqwestItemStore::new(settings)?);
        Self::with_store(store, sink)
    }

    pub fn with_store(
        store: Arc<dyn ItemStore>,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, EngineError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()?;
        let (cmd_tx, cmd_rx) = mpsc::channel::<EngineCommand>();

        thread::Builder::new()
            .name("inventory-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let store = store.clone();
                    let sink = sink.clone();
                    runtime.spawn(async move {
                        handle_command(store.as_ref(), sink.as_ref(), command).await;
                    });
                }
                inventory_info!("Store engine stopped");
            })?;

        Ok(Self { cmd_tx })
    }

    pub fn submit(&self, request_id: RequestId, request: StoreRequest) {
        let _ = self.cmd_tx.send(EngineCommand {
            request_id,
            request,
        });
    }
}

async fn handle_command(store: &dyn ItemStore, sink: &dyn EventSink, command: EngineCommand) {
    let EngineCommand {
        request_id,
        request,
    } = command;
    inventory_debug!("request {} started: {:?}", request_id, request.action());
    let outcome = request.execute(store).await;
    sink.emit(EngineEvent {
        request_id,
        outcome,
    });
}
