use crate::config::{Listen, Log};

// default values
pub fn get_default_address() -> String {
    String::from("127.0.0.1")
}

pub fn get_default_port() -> u32 {
    80
}

pub fn get_default_buffer_size() -> usize {
    4096
}

pub fn get_default_log_level() -> String {
    String::from("info")
}

pub fn get_default_listen() -> Listen {
    Listen {
        address: get_default_address(),
        port: get_default_port(),
    }
}

pub fn get_default_log() -> Log {
    Log {
        level: get_default_log_level(),
    }
}
