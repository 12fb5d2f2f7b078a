pub mod leads;
pub mod login;

pub use leads::list as leads;
pub use login::login;
