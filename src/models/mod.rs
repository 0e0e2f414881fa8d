pub mod geocode;
pub mod location;
pub mod price;
pub mod restaurant;
pub mod search;
