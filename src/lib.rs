//! Form autofill for the administrative web UI.
//!
//! A creation form is seeded from an earlier record of the same model: the
//! record created by the previous submit, a remembered record, or the newest
//! one. Its running number is then bumped by one. The DOM, the browser
//! storage and the two record endpoints sit behind the [`FormSurface`],
//! [`StateStore`] and [`RecordSource`] traits.
//!
//! [`FormSurface`]: form::form_model::FormSurface
//! [`StateStore`]: store::state_store::StateStore
//! [`RecordSource`]: api::client::RecordSource

pub mod api;
pub mod autofill;
pub mod cli;
pub mod error;
pub mod form;
pub mod modal;
pub mod store;
pub mod trace;
