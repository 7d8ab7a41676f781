pub mod initialize_pool;
pub mod add_grants;
pub mod claim;
pub mod change_admin;
pub mod set_issuer;
pub mod queries;

pub use initialize_pool::*;
pub use add_grants::*;
pub use claim::*;
pub use change_admin::*;
pub use set_issuer::*;
pub use queries::*;
