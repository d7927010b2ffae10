pub mod blogs;
pub mod contact;
pub mod experiences;
pub mod home;
pub mod json_error;
pub mod pages;
pub mod projects;
pub mod sitemap;
pub mod system;
pub mod tech_tags;
