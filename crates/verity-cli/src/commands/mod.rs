pub mod code;
pub mod config;
pub mod export;
pub mod items;
pub mod run;
