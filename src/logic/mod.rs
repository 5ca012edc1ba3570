pub mod groups;
pub mod movies;
