use serde::Serialize;

/// A country or subregion with its own grid carbon intensity.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Region {
    pub name: &'static str,
    pub flag_label: &'static str,
    pub region_code: &'static str,
}

impl Region {
    /// Short chart label: the first word of the name.
    pub fn short_label(&self) -> &'static str {
        self.name.split(' ').next().unwrap_or(self.name)
    }
}

/// Regions covered by every calculation run, in request order.
pub const REGIONS: [Region; 10] = [
    Region { name: "India", flag_label: "India Flag", region_code: "IN" },
    Region { name: "USA (Michigan)", flag_label: "USA Flag", region_code: "US-MI" },
    Region { name: "Germany", flag_label: "Germany Flag", region_code: "DE" },
    Region { name: "France", flag_label: "France Flag", region_code: "FR" },
    Region { name: "China", flag_label: "China Flag", region_code: "CN" },
    Region { name: "Japan", flag_label: "Japan Flag", region_code: "JP" },
    Region { name: "United Kingdom", flag_label: "UK Flag", region_code: "GB" },
    Region { name: "Canada", flag_label: "Canada Flag", region_code: "CA" },
    Region { name: "Australia", flag_label: "Australia Flag", region_code: "AU" },
    Region { name: "Brazil", flag_label: "Brazil Flag", region_code: "BR" },
];

/// Look up a catalogue region by code, ignoring case.
pub fn find_region(code: &str) -> Option<&'static Region> {
    let code = code.trim();
    REGIONS.iter().find(|r| r.region_code.eq_ignore_ascii_case(code))
}
