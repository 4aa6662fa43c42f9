pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod forms;
pub mod repository;
