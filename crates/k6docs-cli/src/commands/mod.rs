//! Command implementations for the k6docs CLI
//!
//! Each command writes to a caller-supplied writer so output can be piped
//! through a renderer or captured in tests.

mod all;
mod best_practices;
mod list;
mod prepare;
mod search;
mod setup;
mod show;
mod toc;

#[cfg(test)]
mod test_support;

pub use all::execute as print_all;
pub use best_practices::execute as print_best_practices;
pub use list::execute as list_topics;
pub use prepare::execute as prepare_bundle;
pub use search::execute as search;
pub use setup::Session;
pub use show::execute as show_topic;
pub use toc::execute as print_toc;
