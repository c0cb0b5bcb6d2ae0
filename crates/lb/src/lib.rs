use std::fmt;
use std::sync::Mutex;

use log::warn;

/// A backend address client traffic may be forwarded to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
}

impl Endpoint {
    // Splits "host:port" on the last ':' so hosts containing colons keep them.
    pub fn parse(raw: &str) -> Option<Self> {
        let (host, port) = raw.rsplit_once(':')?;
        if host.is_empty() {
            return None;
        }

        let port: u16 = port.trim().parse().ok()?;
        if port == 0 {
            return None;
        }

        Some(Self {
            host: host.to_string(),
            port,
        })
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

pub struct TargetPool {
    targets: Vec<Endpoint>,
}

impl TargetPool {
    // Entries that do not parse are skipped; the survivors keep their
    // configured order, which is the rotation order.
    pub fn from_strings(raw: &[String]) -> Self {
        let mut targets = Vec::new();
        for entry in raw {
            match Endpoint::parse(entry) {
                Some(endpoint) => targets.push(endpoint),
                None => warn!("Skipping malformed target '{}'", entry),
            }
        }
        Self { targets }
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Endpoint> {
        self.targets.get(index)
    }
}

/// Rotates over a non-empty pool of endpoints, one position per call.
///
/// The cursor lives behind a mutex and is only reachable through `next()`,
/// so selections from any number of tasks form a single round-robin cycle:
/// no endpoint is skipped and none is handed out twice in the same cycle.
pub struct RoundRobin {
    pool: TargetPool,
    cursor: Mutex<usize>,
}

impl RoundRobin {
    // An empty pool is refused here, once, instead of being checked on
    // every selection.
    pub fn new(pool: TargetPool) -> Result<Self, String> {
        if pool.is_empty() {
            return Err("no valid targets to rotate over".to_string());
        }

        Ok(Self {
            pool,
            cursor: Mutex::new(0),
        })
    }

    pub fn next(&self) -> Endpoint {
        let mut cursor = self.cursor.lock().expect("rotation cursor lock poisoned");
        let endpoint = self.pool.targets[*cursor].clone();
        *cursor = (*cursor + 1) % self.pool.len();
        endpoint
    }

    pub fn len(&self) -> usize {
        self.pool.len()
    }
}
