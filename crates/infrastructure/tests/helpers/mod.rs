pub mod dns_server_mock;
