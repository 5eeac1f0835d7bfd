mod precheck_connector_test;
