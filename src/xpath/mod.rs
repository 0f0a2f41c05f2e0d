pub mod locator;
pub mod navigate;
pub mod resolver;
