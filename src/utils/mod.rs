pub mod log_util;
pub mod ocid_util;
pub mod region_util;
pub mod time_util;
