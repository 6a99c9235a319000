use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Annotation color of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// The active label, the active workload and everything it pulls in
    Active,
    /// Labels that are not active, and workloads without the active label
    Inactive,
    /// Workloads carrying the active label
    Selected,
    /// Subjects and packages pulled in by a selected workload
    SelectedDependency,
    /// Packages a selected workload explicitly does not want
    Unwanted,
    /// Free-form color, only produced by overrides
    Rgb(u8, u8, u8),
}

impl Color {
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            Color::Active => (0x00, 0x00, 0xff),
            Color::Inactive => (0xa0, 0xa0, 0xa4),
            Color::Selected => (0x00, 0x00, 0x80),
            Color::SelectedDependency => (0x00, 0x80, 0x00),
            Color::Unwanted => (0xff, 0x00, 0x00),
            Color::Rgb(r, g, b) => (r, g, b),
        }
    }

    pub fn to_hex(self) -> String {
        let (r, g, b) = self.rgb();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Active => write!(f, "active"),
            Color::Inactive => write!(f, "inactive"),
            Color::Selected => write!(f, "selected"),
            Color::SelectedDependency => write!(f, "dependency"),
            Color::Unwanted => write!(f, "unwanted"),
            Color::Rgb(..) => write!(f, "{}", self.to_hex()),
        }
    }
}

/// Serialized as its display form: a palette name or `#rrggbb`
impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" | "blue" => Ok(Color::Active),
            "inactive" | "gray" | "grey" => Ok(Color::Inactive),
            "selected" | "darkblue" => Ok(Color::Selected),
            "dependency" | "darkgreen" => Ok(Color::SelectedDependency),
            "unwanted" | "red" => Ok(Color::Unwanted),
            hex if hex.starts_with('#') && hex.len() == 7 && hex.is_ascii() => {
                let channel = |range: std::ops::Range<usize>| {
                    u8::from_str_radix(&hex[range], 16)
                        .map_err(|_| format!("Invalid color: {}", s))
                };
                Ok(Color::Rgb(channel(1..3)?, channel(3..5)?, channel(5..7)?))
            }
            _ => Err(format!(
                "Invalid color: {}. Use a palette name (active, inactive, selected, dependency, unwanted) or #rrggbb",
                s
            )),
        }
    }
}
