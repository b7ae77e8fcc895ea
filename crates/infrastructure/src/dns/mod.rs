pub mod cache;
pub mod message;
pub mod pool;
pub mod resolver;
pub mod roots;
pub mod transport;
