pub mod interchange;
pub mod slot;
pub mod storage;
