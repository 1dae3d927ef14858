pub mod desktop;
pub mod site;
