pub mod catalog;
pub mod composer;
pub mod error;
pub mod model;
pub mod parser;
pub mod pipeline;
pub mod selector;
