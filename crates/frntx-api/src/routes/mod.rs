pub mod assistants;
pub mod clients;
pub mod files;
pub mod health;
pub mod merchants;
pub mod models;
pub mod threads;
