// Presentation: the HTML form page and the word-cloud image embedded in it.
// Word-cloud rasterization is CPU-bound and is called from tokio::task::spawn_blocking.

pub mod page;
pub mod wordcloud;

pub use page::render_page;
