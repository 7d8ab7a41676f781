pub mod grant;
pub mod pool;
pub mod roles;

pub use grant::*;
pub use pool::*;
pub use roles::*;
