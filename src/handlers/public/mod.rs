pub mod health;
pub mod login_page;
pub mod logout;

pub use health::health;
pub use login_page::{login_form, login_page};
pub use logout::logout;
