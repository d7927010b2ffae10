pub mod blog;
pub mod contact;
pub mod experience;
pub mod pagination;
pub mod project;
pub mod tag;
pub mod validation;
