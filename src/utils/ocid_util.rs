use regex::Regex;

const DRPG_OCID_REGEX: &str = r"^ocid1\.drprotectiongroup\.[^.]+\.[^.]+\.[^.]+$";
const TOPIC_OCID_REGEX: &str = r"^ocid1\.onstopic\.[^.]+\.[^.]+\.[^.]+$";

// ocid1.<type>.<realm>.<region>.<unique>
const REGION_SEGMENT_INDEX: usize = 3;

pub struct OcidUtil {}

impl OcidUtil {
    pub fn is_valid_drpg_ocid(ocid: &str) -> bool {
        Regex::new(DRPG_OCID_REGEX).unwrap().is_match(ocid)
    }

    pub fn is_valid_topic_ocid(ocid: &str) -> bool {
        Regex::new(TOPIC_OCID_REGEX).unwrap().is_match(ocid)
    }

    pub fn region_segment(ocid: &str) -> Option<&str> {
        ocid.split('.').nth(REGION_SEGMENT_INDEX)
    }
}
