pub mod adapters;
pub mod config;
pub mod coords;
pub mod form;
pub mod persistence;
pub mod session;
pub mod store;
pub mod view_model;
pub mod workout;
