//! Browse crate: the glue between the catalog and a course view.
//!
//! - `config`: page sizes, debounce and suggestion limits
//! - `loader`: fetch rows from a `CourseSource`, falling back to seed data,
//!   optionally tied to a `ViewScope`
//! - `session`: `BrowseSession`, which runs query → filter → sort → page for
//!   the Courses and Search views

pub mod config;
pub mod loader;
pub mod session;

pub use config::BrowseConfig;
pub use loader::{load_catalog, load_catalog_in, CourseSource, JsonFileSource, SeedSource, ViewScope};
pub use session::{BrowseSession, View};
