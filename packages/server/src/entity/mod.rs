pub mod administrator;
pub mod event;
pub mod event_administrator;
pub mod event_admin;
pub mod event_participant;
pub mod event_supervisor;
pub mod participant;
pub mod qr_code;
pub mod qr_workshop;
pub mod supervisor;
pub mod workshop;
pub mod workshop_administrator;
pub mod workshop_participant;
pub mod workshop_supervisor;
