pub mod object_pool;
pub mod shared;

pub use object_pool::ObjectPool;
pub use shared::SharedPool;
