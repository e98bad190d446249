pub mod auth;
pub mod event;
pub mod participant;
pub mod supervisor;
pub mod user;
pub mod workshop;
