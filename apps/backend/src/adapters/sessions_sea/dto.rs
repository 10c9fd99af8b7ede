//! DTOs for sessions_sea adapter.

/// DTO for inserting a new session row.
///
/// `capacity` guards the insert: no row is written while any session still
/// has fewer than `capacity` players.
#[derive(Debug, Clone)]
pub struct SessionCreate {
    pub id: String,
    pub player_count: i32,
    pub capacity: i32,
}

impl SessionCreate {
    /// A session whose creator already occupies the first slot.
    pub fn opened_by_creator(id: impl Into<String>, capacity: i32) -> Self {
        Self {
            id: id.into(),
            player_count: 1,
            capacity,
        }
    }
}

/// Compare-and-set input for claiming one slot.
///
/// `observed_count` is the occupancy the caller saw; the write only lands
/// if the row still holds exactly that value and is below `capacity`.
#[derive(Debug, Clone)]
pub struct SlotClaim {
    pub id: String,
    pub observed_count: i32,
    pub capacity: i32,
}
