use serde::{Deserialize, Serialize};

/// Protocol codes for one motor (direction) inside a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateDescriptor {
    /// Direction label (`"North"`, `"South"`, ...). Empty for rooms with a
    /// single motor.
    #[serde(default)]
    pub name: String,
    /// Group code that starts motion.
    pub start: String,
    /// Group code that halts motion.
    pub stop: String,
}

impl StateDescriptor {
    pub fn new(name: impl Into<String>, start: impl Into<String>, stop: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            start: start.into(),
            stop: stop.into(),
        }
    }
}
