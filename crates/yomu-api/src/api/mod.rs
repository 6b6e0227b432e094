//! API module

mod handlers;
mod routes;
mod state;

pub use handlers::{health_check, post_ner, post_pos_tag, post_sentiment, post_tokenize};
pub use routes::{create_router, run_server};
pub use state::AppState;
