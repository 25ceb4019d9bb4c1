pub mod session;
pub mod spawn;
pub mod sync;
