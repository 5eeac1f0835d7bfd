pub mod notifier;
pub mod precheck_connector;
