pub mod handlers;
pub mod ranker;
pub mod store;
