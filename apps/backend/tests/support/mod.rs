#![allow(dead_code)]

pub mod app_builder;
pub mod websocket;
pub mod websocket_client;

pub use app_builder::create_test_app;
pub use websocket::{wait_for_subscribers, TestServer};
pub use websocket_client::WsClient;
