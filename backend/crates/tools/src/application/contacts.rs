//! Submit Contact Use Case

use std::path::PathBuf;
use std::sync::Arc;

use crate::domain::contact::ContactForm;
use crate::domain::repository::ContactStore;
use crate::error::ToolResult;

pub struct SubmitContactUseCase<S>
where
    S: ContactStore,
{
    store: Arc<S>,
}

impl<S> SubmitContactUseCase<S>
where
    S: ContactStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Validate, then persist as pretty-printed JSON.
    pub async fn execute<F: ContactForm>(&self, form: &F) -> ToolResult<PathBuf> {
        form.validate()?;
        let body = serde_json::to_vec_pretty(form)?;
        self.store.save(F::KIND, &body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::contact::{Contact, ExtendedContact};
    use crate::error::ToolError;
    use crate::infra::contact_store::JsonFileContactStore;
    use serde_json::{Value, json};

    fn contact_json() -> Value {
        json!({
            "last_name": "Петрова",
            "first_name": "Анна",
            "date_of_birth": "1985-12-01",
            "phone": "89161234567",
            "email": "anna@example.ru"
        })
    }

    #[tokio::test]
    async fn test_valid_form_is_written_as_json() {
        let tmp = tempfile::tempdir().unwrap();
        let uc = SubmitContactUseCase::new(Arc::new(JsonFileContactStore::new(tmp.path())));

        let mut body = contact_json();
        body["reason"] = json!("не приходят письма");
        body["detected_at"] = json!("2024-03-01T10:15:00");
        let form: ExtendedContact = serde_json::from_value(body.clone()).unwrap();

        let path = uc.execute(&form).await.unwrap();

        assert!(
            path.file_name()
                .unwrap()
                .to_str()
                .unwrap()
                .starts_with("contact_extended_")
        );
        let stored: Value = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(stored, body);
    }

    #[tokio::test]
    async fn test_invalid_form_writes_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let uc = SubmitContactUseCase::new(Arc::new(JsonFileContactStore::new(tmp.path())));

        let mut form: Contact = serde_json::from_value(contact_json()).unwrap();
        form.phone = "123".into();

        assert!(matches!(
            uc.execute(&form).await,
            Err(ToolError::InvalidContact(_))
        ));
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
    }
}
