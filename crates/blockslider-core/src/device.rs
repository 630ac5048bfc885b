//! Screen-size classes and reading direction reported by the host device.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Named responsive tier the enabled-screen-sizes setting is matched against
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScreenSize {
    Small,
    Medium,
    Large,
}

impl ScreenSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScreenSize::Small => "small",
            ScreenSize::Medium => "medium",
            ScreenSize::Large => "large",
        }
    }
}

impl fmt::Display for ScreenSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScreenSize {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "small" => Ok(ScreenSize::Small),
            "medium" => Ok(ScreenSize::Medium),
            "large" => Ok(ScreenSize::Large),
            other => Err(Error::Config(format!("unknown screen size '{}'", other))),
        }
    }
}

/// Reading direction of the course
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
}

impl Direction {
    #[inline]
    pub fn is_rtl(&self) -> bool {
        matches!(self, Direction::Rtl)
    }
}

/// Width thresholds separating the screen-size classes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Breakpoints {
    /// Smallest width classified as medium
    #[serde(default = "default_medium")]
    pub medium: f64,
    /// Smallest width classified as large
    #[serde(default = "default_large")]
    pub large: f64,
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            medium: default_medium(),
            large: default_large(),
        }
    }
}

impl Breakpoints {
    pub fn classify(&self, width: f64) -> ScreenSize {
        if width >= self.large {
            ScreenSize::Large
        } else if width >= self.medium {
            ScreenSize::Medium
        } else {
            ScreenSize::Small
        }
    }
}

fn default_medium() -> f64 {
    80.0
}

fn default_large() -> f64 {
    120.0
}

/// Device state as last reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Device {
    pub screen_size: ScreenSize,
    pub direction: Direction,
}

impl Device {
    pub fn new(screen_size: ScreenSize, direction: Direction) -> Self {
        Self {
            screen_size,
            direction,
        }
    }
}

impl Default for Device {
    fn default() -> Self {
        Self::new(ScreenSize::Large, Direction::Ltr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_screen_size() {
        assert_eq!("large".parse::<ScreenSize>().unwrap(), ScreenSize::Large);
        assert_eq!(" Medium ".parse::<ScreenSize>().unwrap(), ScreenSize::Medium);
        assert!("xlarge".parse::<ScreenSize>().is_err());
    }

    #[test]
    fn test_classify() {
        let bp = Breakpoints::default();
        assert_eq!(bp.classify(40.0), ScreenSize::Small);
        assert_eq!(bp.classify(80.0), ScreenSize::Medium);
        assert_eq!(bp.classify(119.0), ScreenSize::Medium);
        assert_eq!(bp.classify(200.0), ScreenSize::Large);
    }
}
