pub mod address_search;
pub mod container;
pub mod map_view;
pub mod options;
pub mod page;
pub mod query;
