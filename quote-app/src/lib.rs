pub mod commands;
pub mod config;
pub mod session;
pub mod whatsapp;
