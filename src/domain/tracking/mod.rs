//! Critical Tracking Invariants:
//!
//! 1. A manga is caught-up, completed, or neither; never both
//! 2. Marking into a list it already sits in changes nothing
//! 3. Completed stays ordered by rating (stable, unrated = 0)
//! 4. Ratings outside 1..=10 are rejected before state is touched
//! 5. Cover overrides exist independently of tracking
//! 6. Dropping an item makes it a discovery candidate again

pub mod command;
pub mod entity;
pub mod invariants;
pub mod state;
pub mod view;

pub use command::TrackingCommand;
pub use entity::{Rating, TrackedItem, TrackingAction, TrackingList, CANDIDATE_ACTIONS};
pub use invariants::validate_tracking_state;
pub use state::{TrackedKeys, TrackingState};
pub use view::{ItemView, TrackingView};
