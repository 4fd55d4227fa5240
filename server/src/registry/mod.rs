mod authority_context;
mod entity_registry;

pub use authority_context::AuthorityContext;
pub use entity_registry::{EntityRegistry, EntitySnapshot};
