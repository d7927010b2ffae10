pub mod blog;
pub mod contact;
pub mod experience;
pub mod pages;
pub mod pagination;
pub mod project;
pub mod seed;
pub mod tags;
