mod door;
mod moving_platform;
mod path_follower;

pub use door::{Door, DoorState, DOOR_SCHEMA};
pub use moving_platform::{MovingPlatform, PlatformState, PLATFORM_SCHEMA};
pub use path_follower::{PathFollower, PathState, PATH_FOLLOWER_SCHEMA};
