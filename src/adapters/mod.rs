pub mod settings_adapter;
pub mod sim_market_adapter;
