//! One-shot UDP exchange: one query packet out, one response packet back.

pub mod udp;

pub use udp::UdpExchange;
