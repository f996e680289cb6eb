pub mod agenda;
pub mod countdown;
pub mod export;
pub mod links;
