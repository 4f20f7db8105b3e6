mod about;
mod footer;
mod home;

pub use about::*;
pub use footer::*;
pub use home::*;
