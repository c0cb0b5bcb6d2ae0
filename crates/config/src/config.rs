use serde::{Deserialize, Serialize};

use crate::default::{
    get_default_address, get_default_buffer_size, get_default_listen, get_default_log,
    get_default_log_level, get_default_port,
};

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default = "get_default_listen")]
    pub listen: Listen,

    // relay chunk size, bytes read per step in either direction
    #[serde(default = "get_default_buffer_size")]
    pub buffer_size: usize,

    // "host:port" strings; list order is rotation order
    pub targets: Vec<String>,

    #[serde(default = "get_default_log")]
    pub log: Log,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Listen {
    #[serde(default = "get_default_address")]
    pub address: String, // "127.0.0.1"

    #[serde(default = "get_default_port")]
    pub port: u32, // 80
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Log {
    #[serde(default = "get_default_log_level")]
    pub level: String, // "info, warn, error"
}
