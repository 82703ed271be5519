pub mod experience;
