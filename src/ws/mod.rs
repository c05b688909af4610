pub mod classroom;
pub mod codeshare;
pub mod connctx;
pub mod pollshare;
pub mod registry;
