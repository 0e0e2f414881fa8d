pub mod address_search;
pub mod detail;
pub mod filters;
pub mod map;
pub mod page;
pub mod restaurant_list;
