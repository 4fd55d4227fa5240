pub mod component;
pub mod diff_mask;
pub mod error;
pub mod network_id;
pub mod replicate;
pub mod world_type;
