pub mod blog;
pub mod contact;
pub mod experience;
pub mod in_memory;
pub mod maintenance;
pub mod project;
pub mod sqlx_repo;
pub mod tag;
