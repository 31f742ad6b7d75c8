pub mod cli;
pub mod config;
pub mod db;
pub mod demo;
pub mod error;
pub mod models;

pub use db::ClientRepository;
pub use error::RepositoryError;
