mod wrappers;

pub use wrappers::{generate_wrappers, method_identifier};
