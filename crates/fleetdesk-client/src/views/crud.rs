use fleetdesk_types::forms::{EntityForm, FormMode};
use fleetdesk_types::FieldErrors;

use super::pagination::Pagination;
use super::resource::{PayloadOf, Resource};
use crate::{error_message, AuthClient, ClientResult};

/// Open create/edit dialog.
#[derive(Clone, Debug, PartialEq)]
pub struct Modal<F> {
    pub mode: FormMode,
    pub form: F,
    pub errors: FieldErrors,
    pub submitting: bool,
}

/// State of one resource page: the fetched collection, the page-level error
/// banner, the dialog and the pending delete confirmation.
#[derive(Clone, Debug)]
pub struct CrudPage<R: Resource> {
    pub items: Vec<R::Entity>,
    pub error: Option<String>,
    pub loading: bool,
    pub modal: Option<Modal<R::Form>>,
    pub pending_delete: Option<String>,
    pub pagination: Pagination,
}

impl<R: Resource> Default for CrudPage<R> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            error: None,
            loading: false,
            modal: None,
            pending_delete: None,
            pagination: Pagination::default(),
        }
    }
}

impl<R: Resource> CrudPage<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn find(&self, id: &str) -> Option<&R::Entity> {
        self.items.iter().find(|item| R::id(item) == id)
    }

    pub fn visible_rows(&self) -> &[R::Entity] {
        self.pagination.slice(&self.items)
    }

    pub fn page_count(&self) -> usize {
        self.pagination.page_count(self.items.len())
    }

    pub fn set_page(&mut self, page: usize) {
        self.pagination.set_page(page, self.items.len());
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn begin_load(&mut self) {
        self.loading = true;
    }

    pub fn apply_list(&mut self, result: ClientResult<Vec<R::Entity>>) {
        self.loading = false;
        match result {
            Ok(items) => {
                self.items = items;
                self.error = None;
                self.pagination.clamp(self.items.len());
            }
            Err(e) => {
                tracing::warn!(resource = R::NAME, "failed to load list: {e}");
                self.error = Some(error_message(&e));
            }
        }
    }

    pub fn open_create(&mut self) {
        self.modal = Some(Modal {
            mode: FormMode::Create,
            form: R::Form::default(),
            errors: FieldErrors::new(),
            submitting: false,
        });
    }

    /// Opens the dialog pre-filled from the fetched row. False when the row is
    /// gone or the resource cannot be edited.
    pub fn open_edit(&mut self, id: &str) -> bool {
        if !R::SUPPORTS_EDIT {
            return false;
        }
        let Some(form) = self.find(id).map(R::Form::from_entity) else {
            return false;
        };

        self.modal = Some(Modal {
            mode: FormMode::Edit { id: id.to_string() },
            form,
            errors: FieldErrors::new(),
            submitting: false,
        });
        true
    }

    pub fn form_mut(&mut self) -> Option<&mut R::Form> {
        self.modal.as_mut().map(|modal| &mut modal.form)
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
    }

    /// Validates the open form. Field errors stay on the dialog and nothing
    /// is returned; otherwise the dialog is marked submitting.
    pub fn prepare_submit(&mut self) -> Option<(FormMode, PayloadOf<R>)> {
        let modal = self.modal.as_mut()?;
        if modal.submitting {
            return None;
        }

        match modal.form.submission(&modal.mode) {
            Ok(payload) => {
                modal.errors = FieldErrors::new();
                modal.submitting = true;
                Some((modal.mode.clone(), payload))
            }
            Err(errors) => {
                modal.errors = errors;
                None
            }
        }
    }

    /// Closes the dialog on success. On failure it stays open and the banner
    /// shows the server's message. Returns whether a refetch is due.
    pub fn apply_submit(&mut self, result: ClientResult<()>) -> bool {
        match result {
            Ok(()) => {
                self.modal = None;
                true
            }
            Err(e) => {
                tracing::warn!(resource = R::NAME, "failed to save: {e}");
                if let Some(modal) = self.modal.as_mut() {
                    modal.submitting = false;
                }
                self.error = Some(error_message(&e));
                false
            }
        }
    }

    pub fn request_delete(&mut self, id: &str) -> bool {
        if !R::SUPPORTS_DELETE || self.find(id).is_none() {
            return false;
        }
        self.pending_delete = Some(id.to_string());
        true
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Consumes the confirmation, yielding the id to delete.
    pub fn take_confirmed_delete(&mut self) -> Option<String> {
        self.pending_delete.take()
    }

    pub fn apply_delete(&mut self, result: ClientResult<()>) -> bool {
        match result {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(resource = R::NAME, "failed to delete: {e}");
                self.error = Some(error_message(&e));
                false
            }
        }
    }

    pub async fn refresh(&mut self, client: &AuthClient) {
        self.begin_load();
        let result = R::list(client).await;
        self.apply_list(result);
    }

    /// Validates, saves and refetches. Returns true when the save went through.
    pub async fn submit(&mut self, client: &AuthClient) -> bool {
        let Some((mode, payload)) = self.prepare_submit() else {
            return false;
        };

        let result = match &mode {
            FormMode::Create => R::create(client, &payload).await,
            FormMode::Edit { id } => R::update(client, id, &payload).await,
        };

        let saved = self.apply_submit(result);
        if saved {
            self.refresh(client).await;
        }
        saved
    }

    /// Deletes the confirmed row and refetches. No-op without a confirmation.
    pub async fn confirm_delete(&mut self, client: &AuthClient) -> bool {
        let Some(id) = self.take_confirmed_delete() else {
            return false;
        };

        let deleted = self.apply_delete(R::delete(client, &id).await);
        if deleted {
            self.refresh(client).await;
        }
        deleted
    }
}
