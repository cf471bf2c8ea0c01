// Models module - Database entity representations

pub mod account;
pub mod living_dex;
pub mod membership;
pub mod user;

pub use account::AccountSummary;
pub use living_dex::{LivingDex, LivingDexSummary};
pub use membership::{Membership, SessionMembership};
pub use user::User;
