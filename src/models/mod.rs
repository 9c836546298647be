pub mod from_row;
pub mod member;
pub mod workout_session;

pub use from_row::FromSqliteRow;
pub use member::{Member, MemberInput};
pub use workout_session::{WorkoutSession, WorkoutSessionInput};
