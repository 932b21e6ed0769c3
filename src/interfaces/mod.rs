pub mod providers;
pub mod voice;
