pub mod control;
pub mod form_model;
