pub mod auth;
pub mod enrollment;
pub mod event;
pub mod shared;
pub mod supervisor;
pub mod user;
pub mod workshop;
