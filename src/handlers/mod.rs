pub mod api;
pub mod catalog;
pub mod dashboard;
pub mod helpers;
pub mod theme;
