pub mod dr_enums;
pub mod drpg;
pub mod precheck_options;
pub mod precheck_result;
