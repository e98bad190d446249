pub mod event;
pub mod folio;
pub mod hash;
pub mod identity;
pub mod jwt;
pub mod mail;
pub mod password;
pub mod qr;
pub mod recovery;
pub mod schedule;
pub mod workshop;
