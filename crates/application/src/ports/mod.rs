pub mod dns_resolver;
