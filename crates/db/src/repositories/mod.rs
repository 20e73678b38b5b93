//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Every note and category
//! query is scoped by `user_id`; ownership misses surface as `None` /
//! `false`, never as another user's row.

pub mod category_repo;
pub mod note_repo;
pub mod session_repo;
pub mod tag_repo;
pub mod template_repo;
pub mod user_repo;

pub use category_repo::CategoryRepo;
pub use note_repo::NoteRepo;
pub use session_repo::SessionRepo;
pub use tag_repo::TagRepo;
pub use template_repo::TemplateRepo;
pub use user_repo::UserRepo;
