pub mod market_data_port;
