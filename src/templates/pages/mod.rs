pub mod admin;
pub mod edit_website;
pub mod home;
pub mod login;

pub use admin::{admin_page, AdminVm};
pub use edit_website::edit_website_page;
pub use home::home_page;
pub use login::login_page;
