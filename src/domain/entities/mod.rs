mod message;
mod profession;
mod session;
mod user;

pub use message::{Action, CallbackAction, Event, InlineButton, Keyboard};
pub use profession::{
    EducationLevel, InteractionLevel, ProfessionDetails, ProfessionMatch, ProfessionSummary,
    LEVEL_UNKNOWN,
};
pub use session::{Answers, Session, Stage};
pub use user::UserProfile;
