//! Enquiry and form commands.

use four_skincare_core::ProductId;
use four_skincare_storefront::error::Result;
use four_skincare_storefront::services::forms::{
    CONTACT_RECEIVED_MESSAGE, ContactForm, NewsletterForm, SUBSCRIBED_MESSAGE,
};
use four_skincare_storefront::state::Storefront;
use four_skincare_storefront::storage::Storage;

use crate::render;

/// Print the WhatsApp enquiry link for a product.
///
/// # Errors
///
/// Returns an error for an unknown product or when no WhatsApp number is
/// configured.
pub fn inquire<S: Storage>(shop: &Storefront<S>, product: ProductId) -> Result<()> {
    let link = shop.inquiry_link(product)?;
    render::emit(link.as_str());
    Ok(())
}

/// Submit the newsletter form.
///
/// # Errors
///
/// Returns an error if the email is invalid.
pub fn subscribe(email: &str) -> Result<()> {
    NewsletterForm {
        email: email.to_owned(),
    }
    .submit()?;
    render::emit(SUBSCRIBED_MESSAGE);
    Ok(())
}

/// Submit the contact form.
///
/// # Errors
///
/// Returns an error listing every invalid field.
pub fn contact(name: String, email: String, message: String) -> Result<()> {
    ContactForm {
        name,
        email,
        message,
    }
    .submit()?;
    render::emit(CONTACT_RECEIVED_MESSAGE);
    Ok(())
}

#[cfg(test)]
mod tests {
    use four_skincare_storefront::error::AppError;

    use super::*;

    #[test]
    fn test_subscribe_rejects_bad_email() {
        assert!(matches!(subscribe("not-an-email"), Err(AppError::Form(_))));
        assert!(subscribe("hira@example.pk").is_ok());
    }

    #[test]
    fn test_contact_collects_field_errors() {
        let Err(AppError::Form(errors)) = contact(String::new(), "x".into(), " ".into()) else {
            panic!("expected form errors");
        };
        assert_eq!(errors.fields.len(), 3);
    }
}
