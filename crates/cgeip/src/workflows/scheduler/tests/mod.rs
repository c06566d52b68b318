mod common;
mod tick;
