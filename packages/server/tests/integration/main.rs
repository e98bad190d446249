mod common;

mod attendance;
mod auth;
mod enrollment;
mod event;
mod workshop;
