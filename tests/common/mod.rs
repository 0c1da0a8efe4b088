pub mod fake_source;
pub mod utils;
