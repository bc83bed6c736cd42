mod common;
mod sort;
mod summary;
