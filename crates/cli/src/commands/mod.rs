pub mod compute;
pub mod het_profile;
pub mod inspect;
