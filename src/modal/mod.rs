pub mod html;
pub mod modal_model;
