use std::sync::Arc;

use tracing::{error, info};

use crate::{
    entities::contact::{ContactForm, ContactReceipt, NewContact},
    errors::AppError,
    mail::{mailer::Mailer, templates::contact_notification},
    repositories::contact::ContactRepository,
};

pub const CONTACT_SAVE_FAILED: &str = "Database error creating contact entry";

pub struct ContactHandler<R, M>
where
    R: ContactRepository + ?Sized,
    M: Mailer + ?Sized,
{
    pub contact_repo: Arc<R>,
    pub mailer: Arc<M>,
}

impl<R, M> ContactHandler<R, M>
where
    R: ContactRepository + ?Sized,
    M: Mailer + ?Sized,
{
    pub fn new(contact_repo: Arc<R>, mailer: Arc<M>) -> Self {
        ContactHandler { contact_repo, mailer }
    }

    /// Validates and stores a submission, then notifies the site owner.
    /// A failed notification never fails the submission.
    pub async fn submit_contact(&self, form: ContactForm) -> Result<ContactReceipt, AppError> {
        let new_contact = NewContact::try_from(form)?;

        let contact = self
            .contact_repo
            .create_contact(&new_contact)
            .await
            .map_err(|e| {
                error!("Database error creating contact entry: {}", e);
                AppError::InternalError(CONTACT_SAVE_FAILED.to_string())
            })?;

        match self.mailer.send(&contact_notification(&contact)).await {
            Ok(()) => info!(contact_id = contact.id, "Contact notification sent"),
            Err(e) => error!(contact_id = contact.id, "Failed to send notification email: {}", e),
        }

        Ok(ContactReceipt {
            success: true,
            message: "Contact form submitted successfully".to_string(),
            contact_id: contact.id,
        })
    }
}
