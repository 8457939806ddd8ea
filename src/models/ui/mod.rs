// UI models module
// View types shared by settings, navigation and the CLI

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which unit one calendar page covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ViewType {
    Day,
    Week,
    #[default]
    Month,
}

impl ViewType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewType::Day => "Day",
            ViewType::Week => "Week",
            ViewType::Month => "Month",
        }
    }
}

impl fmt::Display for ViewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(ViewType::Day),
            "week" => Ok(ViewType::Week),
            "month" => Ok(ViewType::Month),
            other => Err(format!("Unknown view type '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_month() {
        assert_eq!(ViewType::default(), ViewType::Month);
    }

    #[test]
    fn test_parse_round_trips_display() {
        for view in [ViewType::Day, ViewType::Week, ViewType::Month] {
            assert_eq!(view.to_string().parse::<ViewType>(), Ok(view));
        }
        assert_eq!(" WEEK ".parse::<ViewType>(), Ok(ViewType::Week));
        assert!("Quarter".parse::<ViewType>().is_err());
    }
}
