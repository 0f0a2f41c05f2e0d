pub mod capture;
pub mod injector;
pub mod monitor;
pub mod session;
