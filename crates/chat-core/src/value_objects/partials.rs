//! Partial structure flags
//!
//! Controls which structures the client may materialize from incomplete
//! gateway data instead of dropping the event.

use bitflags::bitflags;
use std::fmt;

bitflags! {
    /// Structures that may be cached as partial stubs
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Partials: u8 {
        /// Uncached messages referenced by reaction events become stubs
        const MESSAGE  = 1 << 0;
        /// Reactions on partial messages are tracked (with unknown count)
        const REACTION = 1 << 1;

        const ALL = Self::MESSAGE.bits() | Self::REACTION.bits();
    }
}

impl Partials {
    /// Parse a comma-separated list such as `"message,reaction"`
    ///
    /// Unknown names are reported back so configuration can reject them.
    pub fn parse_list(s: &str) -> Result<Self, String> {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .try_fold(Partials::empty(), |acc, part| {
                match part.to_lowercase().as_str() {
                    "message" => Ok(acc | Partials::MESSAGE),
                    "reaction" => Ok(acc | Partials::REACTION),
                    "all" => Ok(acc | Partials::ALL),
                    _ => Err(part.to_string()),
                }
            })
    }

    /// Names of the flags that are set
    pub fn list(&self) -> Vec<&'static str> {
        let mut result = Vec::new();
        if self.contains(Self::MESSAGE) {
            result.push("message");
        }
        if self.contains(Self::REACTION) {
            result.push("reaction");
        }
        result
    }
}

impl Default for Partials {
    fn default() -> Self {
        Partials::empty()
    }
}

impl fmt::Display for Partials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.list().join(","))
    }
}
