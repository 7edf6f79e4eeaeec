pub mod mempool;
pub mod unisat;
