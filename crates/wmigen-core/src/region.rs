use crate::alphabet::WmiChar;

/// Continent a WMI belongs to, determined by its first symbol.
///
/// The allocation is a fixed property of the numbering scheme, not of any
/// input dataset. The `0` block is unallocated and yields no region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Africa,
    Asia,
    Europe,
    NorthAmerica,
    Oceania,
    SouthAmerica,
}

impl Region {
    /// Region for the first symbol of a WMI.
    pub fn from_first_symbol(symbol: WmiChar) -> Option<Self> {
        match symbol.as_byte() {
            b'A'..=b'H' => Some(Region::Africa),
            b'J'..=b'N' | b'P' | b'R' => Some(Region::Asia),
            b'S'..=b'Z' => Some(Region::Europe),
            b'1'..=b'5' => Some(Region::NorthAmerica),
            b'6' | b'7' => Some(Region::Oceania),
            b'8' | b'9' => Some(Region::SouthAmerica),
            _ => None,
        }
    }

    /// Label used in diagnostics and reports.
    pub fn label(self) -> &'static str {
        match self {
            Region::Africa => "Africa",
            Region::Asia => "Asia",
            Region::Europe => "Europe",
            Region::NorthAmerica => "NorthAmerica",
            Region::Oceania => "Oceania",
            Region::SouthAmerica => "SouthAmerica",
        }
    }
}
