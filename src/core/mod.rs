pub mod academic;
pub mod attendance;
pub mod filter;
pub mod repository;
pub mod roster;
pub mod state;
pub mod stats;
pub mod tuition;
