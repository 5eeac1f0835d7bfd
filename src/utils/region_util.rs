use regex::Regex;

// canonical region identifiers look like us-ashburn-1
const CANONICAL_REGION_REGEX: &str = r"^[a-z0-9]{2}-[a-z0-9]+-\d$";

const REGION_MAPPING: [(&str, &str); 5] = [
    ("iad", "us-ashburn-1"),
    ("phx", "us-phoenix-1"),
    ("fra", "eu-frankfurt-1"),
    ("lhr", "uk-london-1"),
    ("yyz", "ca-toronto-1"),
];

pub struct RegionUtil {}

impl RegionUtil {
    /// Returns the canonical region for a region token, which may already be
    /// canonical or a 3-letter short code. Unknown tokens resolve to None and
    /// the caller treats that as fatal.
    pub fn normalize_region(region: &str) -> Option<String> {
        if Regex::new(CANONICAL_REGION_REGEX).unwrap().is_match(region) {
            return Some(region.to_string());
        }
        REGION_MAPPING
            .iter()
            .find(|(code, _)| *code == region)
            .map(|(_, canonical)| canonical.to_string())
    }
}
