// Browser-facing surface: the form page and its two triggers.

pub mod handlers;
pub mod page;
