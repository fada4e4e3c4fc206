//! Admin form controller: validate, submit, confirm-then-delete, toast.
//!
//! One controller serves every catalog entity; the per-entity parts (names,
//! payload, record type) come from [`FormEntity`].

use std::marker::PhantomData;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::admin_client::AdminClient;
use crate::domain::validation::{
    BillboardInput, CategoryInput, ColorInput, ProductInput, SizeInput,
};
use crate::domain::{
    Billboard, Category, Color, FieldError, ProductDetails, Size, Validate,
};

const GENERIC_ERROR: &str = "Something went wrong please try again";

pub trait FormEntity {
    type Input: Validate + Serialize + Send + Sync;
    type Record: DeserializeOwned + Send;

    /// Lowercase singular, e.g. `color`
    const SINGULAR: &'static str;
    /// Path segment, e.g. `colors`
    const PLURAL: &'static str;
    /// Records that block deletion, if any
    const DEPENDENTS: Option<&'static str>;

    fn record_id(record: &Self::Record) -> &str;
}

pub struct BillboardForm;
pub struct CategoryForm;
pub struct SizeForm;
pub struct ColorForm;
pub struct ProductForm;

impl FormEntity for BillboardForm {
    type Input = BillboardInput;
    type Record = Billboard;
    const SINGULAR: &'static str = "billboard";
    const PLURAL: &'static str = "billboards";
    const DEPENDENTS: Option<&'static str> = Some("categories");

    fn record_id(record: &Billboard) -> &str {
        &record.id
    }
}

impl FormEntity for CategoryForm {
    type Input = CategoryInput;
    type Record = Category;
    const SINGULAR: &'static str = "category";
    const PLURAL: &'static str = "categories";
    const DEPENDENTS: Option<&'static str> = Some("products");

    fn record_id(record: &Category) -> &str {
        &record.id
    }
}

impl FormEntity for SizeForm {
    type Input = SizeInput;
    type Record = Size;
    const SINGULAR: &'static str = "size";
    const PLURAL: &'static str = "sizes";
    const DEPENDENTS: Option<&'static str> = Some("products");

    fn record_id(record: &Size) -> &str {
        &record.id
    }
}

impl FormEntity for ColorForm {
    type Input = ColorInput;
    type Record = Color;
    const SINGULAR: &'static str = "color";
    const PLURAL: &'static str = "colors";
    const DEPENDENTS: Option<&'static str> = Some("products");

    fn record_id(record: &Color) -> &str {
        &record.id
    }
}

impl FormEntity for ProductForm {
    type Input = ProductInput;
    type Record = ProductDetails;
    const SINGULAR: &'static str = "product";
    const PLURAL: &'static str = "products";
    const DEPENDENTS: Option<&'static str> = None;

    fn record_id(record: &ProductDetails) -> &str {
        &record.product.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormLabels {
    pub title: String,
    pub description: String,
    pub toast_message: String,
    pub action: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// Transient notification shown after a mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

impl Toast {
    fn success(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Success,
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            message: message.into(),
        }
    }
}

/// Result of a request that reached the API, successful or not
#[derive(Debug)]
pub struct FormOutcome<R> {
    pub toast: Toast,
    /// Listing page to navigate back to on success
    pub redirect: Option<String>,
    pub record: Option<R>,
}

/// Reasons a form refuses to send anything
#[derive(Debug, PartialEq)]
pub enum FormError {
    Invalid(Vec<FieldError>),
    /// A request is already in flight
    Busy,
    /// Deleting needs an existing record
    NothingToDelete,
    /// `confirm_delete` without an open confirmation modal
    NotConfirmed,
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Marks a request in flight; clears the flags when dropped, including when
/// the caller abandons the request future.
struct InFlight<'a> {
    loading: &'a mut bool,
    confirm_open: Option<&'a mut bool>,
}

impl<'a> InFlight<'a> {
    fn start(loading: &'a mut bool, confirm_open: Option<&'a mut bool>) -> Self {
        *loading = true;
        Self {
            loading,
            confirm_open,
        }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        *self.loading = false;
        if let Some(open) = self.confirm_open.as_deref_mut() {
            *open = false;
        }
    }
}

pub struct EntityForm<E: FormEntity> {
    client: AdminClient,
    store_id: String,
    initial: Option<E::Record>,
    loading: bool,
    confirm_open: bool,
    _entity: PhantomData<E>,
}

impl<E: FormEntity> EntityForm<E> {
    /// Create mode when `initial` is `None`, edit mode otherwise
    pub fn new(client: AdminClient, store_id: impl Into<String>, initial: Option<E::Record>) -> Self {
        Self {
            client,
            store_id: store_id.into(),
            initial,
            loading: false,
            confirm_open: false,
            _entity: PhantomData,
        }
    }

    pub fn mode(&self) -> FormMode {
        if self.initial.is_some() {
            FormMode::Edit
        } else {
            FormMode::Create
        }
    }

    pub fn labels(&self) -> FormLabels {
        let noun = capitalize(E::SINGULAR);
        match self.mode() {
            FormMode::Create => FormLabels {
                title: format!("Create {}", E::SINGULAR),
                description: format!("Add a new {}", E::SINGULAR),
                toast_message: format!("{} created.", noun),
                action: "Create",
            },
            FormMode::Edit => FormLabels {
                title: format!("Edit {}", E::SINGULAR),
                description: format!("Edit a {}", E::SINGULAR),
                toast_message: format!("{} updated.", noun),
                action: "Save changes",
            },
        }
    }

    pub fn initial(&self) -> Option<&E::Record> {
        self.initial.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_confirm_open(&self) -> bool {
        self.confirm_open
    }

    fn listing_path(&self) -> String {
        format!("/{}/{}", self.store_id, E::PLURAL)
    }

    fn collection_endpoint(&self) -> String {
        format!("{}/{}", self.store_id, E::PLURAL)
    }

    fn record_endpoint(&self, record: &E::Record) -> String {
        format!("{}/{}/{}", self.store_id, E::PLURAL, E::record_id(record))
    }

    /// Validate and send the form. Create mode POSTs, edit mode PATCHes.
    pub async fn submit(&mut self, values: E::Input) -> Result<FormOutcome<E::Record>, FormError> {
        if self.loading {
            return Err(FormError::Busy);
        }
        let violations = values.violations();
        if !violations.is_empty() {
            return Err(FormError::Invalid(violations));
        }

        let endpoint = match &self.initial {
            Some(record) => self.record_endpoint(record),
            None => self.collection_endpoint(),
        };
        let editing = self.initial.is_some();

        let result = {
            let _in_flight = InFlight::start(&mut self.loading, None);
            if editing {
                self.client.patch::<_, E::Record>(&endpoint, &values).await
            } else {
                self.client.post::<_, E::Record>(&endpoint, &values).await
            }
        };

        Ok(match result {
            Ok(record) => FormOutcome {
                toast: Toast::success(self.labels().toast_message),
                redirect: Some(self.listing_path()),
                record: Some(record),
            },
            Err(e) => {
                tracing::warn!("Saving {} failed: {}", E::SINGULAR, e);
                FormOutcome {
                    toast: Toast::error(GENERIC_ERROR),
                    redirect: None,
                    record: None,
                }
            }
        })
    }

    /// Open the delete confirmation modal
    pub fn request_delete(&mut self) -> Result<(), FormError> {
        if self.initial.is_none() {
            return Err(FormError::NothingToDelete);
        }
        self.confirm_open = true;
        Ok(())
    }

    pub fn cancel_delete(&mut self) {
        self.confirm_open = false;
    }

    /// Delete the record after confirmation. The modal closes either way.
    pub async fn confirm_delete(&mut self) -> Result<FormOutcome<E::Record>, FormError> {
        if self.loading {
            return Err(FormError::Busy);
        }
        if !self.confirm_open {
            return Err(FormError::NotConfirmed);
        }
        let endpoint = match &self.initial {
            Some(record) => self.record_endpoint(record),
            None => return Err(FormError::NothingToDelete),
        };

        let result = {
            let _in_flight = InFlight::start(&mut self.loading, Some(&mut self.confirm_open));
            self.client.delete(&endpoint).await
        };

        Ok(match result {
            Ok(()) => FormOutcome {
                toast: Toast::success(format!("{} deleted.", capitalize(E::SINGULAR))),
                redirect: Some(self.listing_path()),
                record: None,
            },
            Err(e) => {
                tracing::warn!("Deleting {} failed: {}", E::SINGULAR, e);
                let message = match E::DEPENDENTS {
                    Some(dependents) => format!(
                        "Make sure you removed all {} using this {} first.",
                        dependents,
                        E::SINGULAR
                    ),
                    None => GENERIC_ERROR.to_string(),
                };
                FormOutcome {
                    toast: Toast::error(message),
                    redirect: None,
                    record: None,
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> AdminClient {
        // Never reached by these tests
        AdminClient::new("http://127.0.0.1:9/api", "token")
    }

    fn color() -> Color {
        Color {
            id: "color-1".into(),
            store_id: "store-1".into(),
            name: "Red".into(),
            value: "#ff0000".into(),
            created_at: "2023-03-01T12:00:00.000000Z".into(),
            updated_at: "2023-03-01T12:00:00.000000Z".into(),
        }
    }

    #[test]
    fn labels_follow_mode() {
        let create = EntityForm::<ColorForm>::new(client(), "store-1", None);
        assert_eq!(create.mode(), FormMode::Create);
        let labels = create.labels();
        assert_eq!(labels.title, "Create color");
        assert_eq!(labels.toast_message, "Color created.");
        assert_eq!(labels.action, "Create");

        let edit = EntityForm::<ColorForm>::new(client(), "store-1", Some(color()));
        assert_eq!(edit.mode(), FormMode::Edit);
        let labels = edit.labels();
        assert_eq!(labels.title, "Edit color");
        assert_eq!(labels.description, "Edit a color");
        assert_eq!(labels.toast_message, "Color updated.");
        assert_eq!(labels.action, "Save changes");
    }

    #[tokio::test]
    async fn invalid_values_never_leave_the_form() {
        let mut form = EntityForm::<ColorForm>::new(client(), "store-1", None);
        let err = form
            .submit(ColorInput {
                name: "Red".into(),
                value: "red".into(),
            })
            .await
            .unwrap_err();
        match err {
            FormError::Invalid(fields) => {
                assert!(fields.iter().any(|f| f.message == "String must be a valid hexcode"))
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(!form.is_loading());
    }

    #[tokio::test]
    async fn submit_is_refused_while_loading() {
        let mut form = EntityForm::<ColorForm>::new(client(), "store-1", None);
        form.loading = true;
        let err = form
            .submit(ColorInput {
                name: "Red".into(),
                value: "#ff0000".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(err, FormError::Busy);
    }

    #[tokio::test]
    async fn delete_needs_record_and_confirmation() {
        let mut create = EntityForm::<ColorForm>::new(client(), "store-1", None);
        assert_eq!(create.request_delete(), Err(FormError::NothingToDelete));

        let mut edit = EntityForm::<ColorForm>::new(client(), "store-1", Some(color()));
        assert_eq!(edit.confirm_delete().await.unwrap_err(), FormError::NotConfirmed);

        edit.request_delete().unwrap();
        assert!(edit.is_confirm_open());
        edit.cancel_delete();
        assert!(!edit.is_confirm_open());
    }

    #[test]
    fn capitalizes() {
        assert_eq!(capitalize("billboard"), "Billboard");
        assert_eq!(capitalize(""), "");
    }
}
