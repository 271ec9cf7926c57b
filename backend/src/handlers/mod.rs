pub mod calendar;
pub mod events;
pub mod health;
pub mod upstream;
