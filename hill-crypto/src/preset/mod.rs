pub mod alphabet;
pub mod default_keys;
