pub mod config;
pub mod error;
pub mod form;
pub mod session;
pub mod swagger_doc;
pub mod view;
