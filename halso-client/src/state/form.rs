//! Create/edit dialog state
//!
//! A dialog holds a draft bound to the form inputs. Nothing is checked until
//! submit; a rejected or failed submit leaves the dialog open with the draft
//! as the user typed it.

use shared::validation::summarize;
use shared::{Draft, EntityId, FormMode, Resource, Violation};

use crate::client::HttpClient;
use crate::services::ResourceService;
use crate::{ClientError, ClientResult};

use super::list::ListView;
use super::toast::Toaster;

#[derive(Debug, Clone)]
struct Dialog<D> {
    mode: FormMode,
    /// Id of the entity being edited; `None` when creating
    target: Option<EntityId>,
    draft: D,
    violations: Vec<Violation>,
}

#[derive(Debug, Clone)]
pub struct FormController<R: Resource> {
    dialog: Option<Dialog<R::Draft>>,
}

impl<R: Resource> Default for FormController<R> {
    fn default() -> Self {
        Self { dialog: None }
    }
}

impl<R: Resource> FormController<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open with an empty draft
    pub fn open_create(&mut self) -> &mut R::Draft {
        self.open(FormMode::Create, None, R::Draft::default())
    }

    /// Open pre-filled from `entity`
    pub fn open_edit(&mut self, entity: &R) -> &mut R::Draft {
        self.open(
            FormMode::Edit,
            Some(entity.id().clone()),
            R::Draft::from_entity(entity),
        )
    }

    fn open(&mut self, mode: FormMode, target: Option<EntityId>, draft: R::Draft) -> &mut R::Draft {
        let dialog = self.dialog.insert(Dialog {
            mode,
            target,
            draft,
            violations: Vec::new(),
        });
        &mut dialog.draft
    }

    pub fn is_open(&self) -> bool {
        self.dialog.is_some()
    }

    pub fn mode(&self) -> Option<FormMode> {
        self.dialog.as_ref().map(|d| d.mode)
    }

    pub fn draft(&self) -> Option<&R::Draft> {
        self.dialog.as_ref().map(|d| &d.draft)
    }

    pub fn draft_mut(&mut self) -> Option<&mut R::Draft> {
        self.dialog.as_mut().map(|d| &mut d.draft)
    }

    /// Problems found by the last submit attempt
    pub fn violations(&self) -> &[Violation] {
        self.dialog
            .as_ref()
            .map(|d| d.violations.as_slice())
            .unwrap_or_default()
    }

    /// Discard the dialog and its draft
    pub fn close(&mut self) {
        self.dialog = None;
    }

    /// Validate, send, and merge the server's entity into `list`.
    ///
    /// The dialog closes only on success.
    pub async fn submit<C: HttpClient>(
        &mut self,
        service: &ResourceService<C, R>,
        list: &mut ListView<R>,
        toaster: &mut Toaster,
    ) -> ClientResult<R> {
        let Some(dialog) = self.dialog.as_mut() else {
            return Err(ClientError::Internal("no form is open".to_string()));
        };

        dialog.violations = dialog.draft.validate(dialog.mode);
        if !dialog.violations.is_empty() {
            toaster.error(summarize(&dialog.violations));
            return Err(ClientError::Validation(dialog.violations.clone()));
        }

        let result = match (&dialog.mode, &dialog.target) {
            (FormMode::Edit, Some(id)) => service.update(id, &dialog.draft).await,
            _ => service.create(&dialog.draft).await,
        };

        match result {
            Ok(entity) => {
                let verb = match dialog.mode {
                    FormMode::Create => "created",
                    FormMode::Edit => "updated",
                };
                list.upsert(entity.clone());
                toaster.success(format!("{} {}", R::NAME, verb));
                self.dialog = None;
                Ok(entity)
            }
            Err(e) => {
                toaster.failure(&format!("Could not save {}", R::NAME), &e);
                Err(e)
            }
        }
    }
}
