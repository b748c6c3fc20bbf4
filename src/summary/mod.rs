//! End-of-run reporting: the human-readable console summary and the
//! structured results file.
mod format;
mod json;
mod text;

#[cfg(test)]
mod tests;

pub use json::write_json;
pub use text::print_text;
