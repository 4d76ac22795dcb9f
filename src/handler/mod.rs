mod hello;
mod notfound;
mod polish;

pub use hello::hello_handler;
pub use notfound::handler_404;
pub use polish::{polish_handler_post, polish_history_handler_get};
