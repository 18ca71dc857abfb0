// crates/orderflow-core/src/types.rs

use std::fmt;

/// Provenance label attached to every row before the regional sources are unioned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    A,
    B,
}

impl Region {
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::A => "A",
            Region::B => "B",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
