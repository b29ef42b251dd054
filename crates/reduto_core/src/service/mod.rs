//! Use-case services wiring storage, lookup and notifications.

pub mod registration;

pub use registration::{
    AutofillOutcome, LookupTicket, RegistrationService, SubmitOutcome, ValidationFailure,
};
