//! Form/detail controller: the state machine behind create, update and
//! delete.
//!
//! ```text
//! Idle -> Validating -> Idle (field errors)
//!                    -> Submitting -> ResultDialog(Success) -> navigate to list
//!                                  -> ResultDialog(Error)   -> Idle, input kept
//! Idle -> ConfirmPending -> Submitting (confirm) | Idle (cancel)
//! ```
//!
//! Only one phase exists at a time, so a second dialog or a second in-flight
//! submit cannot be represented.
use crate::validate::{validate, Field, FieldErrors, RawFormInput};
use crate::{Item, ItemId, NormalizedItem, RequestFailure, RequestId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(ItemId),
}

/// A store call started by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Update(ItemId),
    Delete(ItemId),
}

impl Operation {
    fn success_message(self) -> &'static str {
        match self {
            Operation::Create => "Item created successfully!",
            Operation::Update(_) => "Item updated successfully!",
            Operation::Delete(_) => "Item deleted successfully!",
        }
    }

    fn failure_prefix(self) -> &'static str {
        match self {
            Operation::Create => "Error creating item",
            Operation::Update(_) => "Error updating item",
            Operation::Delete(_) => "Error deleting item",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultDialog {
    pub kind: DialogKind,
    pub title: &'static str,
    pub message: String,
}

impl ResultDialog {
    fn success(operation: Operation) -> Self {
        Self {
            kind: DialogKind::Success,
            title: "Success!",
            message: operation.success_message().to_string(),
        }
    }

    fn error(operation: Operation, failure: &RequestFailure) -> Self {
        Self {
            kind: DialogKind::Error,
            title: "Error!",
            message: format!("{}: {}", operation.failure_prefix(), failure.message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPhase {
    Idle,
    /// Transient: entered and left within one submit.
    Validating,
    ConfirmPending,
    Submitting {
        operation: Operation,
        request_id: RequestId,
    },
    ResultDialog(ResultDialog),
}

/// A request the caller must hand to the store.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Save {
        operation: Operation,
        payload: NormalizedItem,
    },
    Delete {
        item_id: ItemId,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormController {
    mode: FormMode,
    input: RawFormInput,
    errors: FieldErrors,
    phase: FormPhase,
}

impl FormController {
    pub fn for_create() -> Self {
        Self {
            mode: FormMode::Create,
            input: RawFormInput::default(),
            errors: FieldErrors::default(),
            phase: FormPhase::Idle,
        }
    }

    /// Controller for an existing item, pre-filled from its current values.
    pub fn for_item(item: &Item) -> Self {
        let mut controller = Self::for_create();
        controller.mode = FormMode::Edit(item.id);
        controller.reset_input_from(item);
        controller
    }

    pub fn reset_input_from(&mut self, item: &Item) {
        self.input = RawFormInput {
            name: item.name.clone(),
            description: item.description.clone(),
            price: item.price.map(|price| price.to_string()).unwrap_or_default(),
        };
        self.errors = FieldErrors::default();
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn input(&self) -> &RawFormInput {
        &self.input
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn phase(&self) -> &FormPhase {
        &self.phase
    }

    pub fn is_idle(&self) -> bool {
        self.phase == FormPhase::Idle
    }

    /// The request currently awaited, if any.
    pub fn pending_request(&self) -> Option<RequestId> {
        match self.phase {
            FormPhase::Submitting { request_id, .. } => Some(request_id),
            _ => None,
        }
    }

    /// Stores typed text and clears that field's error. Ignored outside `Idle`.
    pub fn edit_field(&mut self, field: Field, value: String) -> bool {
        if !self.is_idle() {
            return false;
        }
        self.input.set(field, value);
        self.errors.clear(field);
        true
    }

    /// Validates the input and, if it passes, moves to `Submitting`.
    ///
    /// Returns `None` when the form is not idle or the input is invalid; in
    /// the latter case the field errors are recorded and the phase returns to
    /// `Idle`.
    pub fn submit(&mut self, request_id: RequestId) -> Option<Submission> {
        if !self.is_idle() {
            return None;
        }
        self.phase = FormPhase::Validating;
        match validate(&self.input) {
            Ok(payload) => {
                self.errors = FieldErrors::default();
                let operation = match self.mode {
                    FormMode::Create => Operation::Create,
                    FormMode::Edit(item_id) => Operation::Update(item_id),
                };
                self.phase = FormPhase::Submitting {
                    operation,
                    request_id,
                };
                Some(Submission::Save { operation, payload })
            }
            Err(errors) => {
                self.errors = errors;
                self.phase = FormPhase::Idle;
                None
            }
        }
    }

    /// Explicit delete request; only meaningful for an existing item.
    pub fn request_delete(&mut self) -> bool {
        if !self.is_idle() || self.mode == FormMode::Create {
            return false;
        }
        self.phase = FormPhase::ConfirmPending;
        true
    }

    pub fn confirm_delete(&mut self, request_id: RequestId) -> Option<Submission> {
        let FormMode::Edit(item_id) = self.mode else {
            return None;
        };
        if self.phase != FormPhase::ConfirmPending {
            return None;
        }
        self.phase = FormPhase::Submitting {
            operation: Operation::Delete(item_id),
            request_id,
        };
        Some(Submission::Delete { item_id })
    }

    pub fn cancel_delete(&mut self) -> bool {
        if self.phase != FormPhase::ConfirmPending {
            return false;
        }
        self.phase = FormPhase::Idle;
        true
    }

    /// Applies the outcome of the in-flight request. Outcomes for any other
    /// request id are stale and ignored.
    pub fn complete(&mut self, request_id: RequestId, result: Result<(), &RequestFailure>) -> bool {
        let FormPhase::Submitting {
            operation,
            request_id: pending,
        } = self.phase
        else {
            return false;
        };
        if pending != request_id {
            return false;
        }
        self.phase = FormPhase::ResultDialog(match result {
            Ok(()) => {
                if operation == Operation::Create {
                    self.input = RawFormInput::default();
                }
                ResultDialog::success(operation)
            }
            Err(failure) => ResultDialog::error(operation, failure),
        });
        true
    }

    /// Dismisses the result dialog and returns its kind. The caller navigates
    /// away on `Success`; on `Error` the form is idle again with its input.
    pub fn close_dialog(&mut self) -> Option<DialogKind> {
        let FormPhase::ResultDialog(dialog) = &self.phase else {
            return None;
        };
        let kind = dialog.kind;
        self.phase = FormPhase::Idle;
        Some(kind)
    }

    pub fn dialog(&self) -> Option<&ResultDialog> {
        match &self.phase {
            FormPhase::ResultDialog(dialog) => Some(dialog),
            _ => None,
        }
    }
}
