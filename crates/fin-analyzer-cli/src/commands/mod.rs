pub mod document;
pub mod scoring;
pub mod toolkit;
