//! Mock server fixture shared by the integration tests.

#![allow(dead_code)]

use mockito::{Server, ServerGuard};
use rusty_docai::DocAi;

pub const TOKEN: &str = "test-token";

pub struct Fixture {
    pub server: ServerGuard,
    pub sdk: DocAi,
}

impl Fixture {
    pub fn new() -> Self {
        let server = Server::new();
        let sdk = DocAi::new(server.url(), TOKEN).unwrap();
        Self { server, sdk }
    }

    pub fn json_mock(&mut self, method: &str, path: &str, status: usize, body: &str) -> mockito::Mock {
        self.server
            .mock(method, path)
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create()
    }
}
