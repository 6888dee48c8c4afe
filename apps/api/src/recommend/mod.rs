pub mod catalog;
pub mod engine;
pub mod handlers;
pub mod loader;
pub mod range;
pub mod stop_words;
pub mod tfidf;
