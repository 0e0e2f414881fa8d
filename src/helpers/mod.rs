pub mod debounce;
pub mod handler_404;
pub mod href;
pub mod html;
