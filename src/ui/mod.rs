pub(crate) mod action;
pub(crate) mod app;
pub(crate) mod render;
pub(crate) mod util;

#[cfg(test)]
#[path = "util_tests.rs"]
mod util_tests;

#[cfg(test)]
#[path = "render_tests.rs"]
mod render_tests;
