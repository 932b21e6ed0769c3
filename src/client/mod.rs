pub mod console;
pub mod history;
pub mod proxy;
pub mod session;
pub mod speech;
