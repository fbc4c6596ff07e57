pub mod money;
pub mod order;
pub mod ports;
pub mod purchase;
pub mod settings;
