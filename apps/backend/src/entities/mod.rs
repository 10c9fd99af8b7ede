pub mod moves;
pub mod sessions;

pub use moves::Entity as Moves;
pub use moves::Model as Move;
pub use sessions::Entity as Sessions;
pub use sessions::Model as Session;
