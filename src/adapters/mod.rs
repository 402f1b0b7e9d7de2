pub mod console;
pub mod google;
