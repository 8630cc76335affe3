//! Domain entities, their merge-patch types, and the pagination envelope.

mod address;
mod contact;
pub mod page;
mod user;

pub use address::{Address, AddressPatch, NewAddress};
pub use contact::{Contact, ContactPatch, NewContact};
pub use page::{AddressPage, ContactPage, Page, PageRequest, PageRequestError, UserPage};
pub use user::{AuthenticatedUser, NewUser, User, UserPatch, UserProfile};

/// Overwrite a required field only when a value was supplied.
pub(crate) fn patch_required(slot: &mut String, value: Option<String>) {
    if let Some(value) = value {
        *slot = value;
    }
}

/// Overwrite an optional field when a value was supplied. A blank value
/// clears the field; an omitted one leaves it untouched.
pub(crate) fn patch_optional(slot: &mut Option<String>, value: Option<String>) {
    if let Some(value) = value {
        *slot = if value.trim().is_empty() {
            None
        } else {
            Some(value)
        };
    }
}
