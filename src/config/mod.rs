pub mod client_profile;
pub mod ini_loader;
pub mod region_file;
