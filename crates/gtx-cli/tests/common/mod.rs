use std::path::{Path, PathBuf};
use std::process::Output;

use serde_json::{Value, json};
use tempfile::TempDir;
use tokio::process::Command;
use wiremock::{MockServer, ResponseTemplate};

/// Isolated token file and API address for one CLI invocation sequence.
pub struct CliEnv {
    pub dir: TempDir,
    pub api_url: String,
}

impl CliEnv {
    pub fn new(server: &MockServer) -> Self {
        Self {
            dir: TempDir::new().unwrap(),
            api_url: server.uri(),
        }
    }

    pub fn token_file(&self) -> PathBuf {
        self.dir.path().join("tokens.json")
    }

    /// Write a token file as a previous login would have left it.
    pub fn seed_tokens(&self, access: &str, refresh: Option<&str>) {
        let mut value = json!({ "accessToken": access });
        if let Some(refresh) = refresh {
            value["refreshToken"] = json!(refresh);
        }
        std::fs::write(self.token_file(), value.to_string()).unwrap();
    }

    pub fn stored_tokens(&self) -> Option<Value> {
        read_json(&self.token_file())
    }

    /// Run the CLI binary against the mock API.
    pub async fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_gtx"))
            .args(args)
            .env("GTX_API_URL", &self.api_url)
            .env("GTX_TOKEN_FILE", self.token_file())
            .env("GTX_PARTNER_PACKAGE", "partner-key")
            .env("NO_COLOR", "1")
            .env_remove("GTX_PASSWORD")
            .env_remove("RUST_LOG")
            .output()
            .await
            .expect("Failed to execute CLI")
    }

    /// Run the CLI and expect success, returning stdout.
    pub async fn run_success(&self, args: &[&str]) -> String {
        let output = self.run(args).await;
        if !output.status.success() {
            panic!(
                "CLI command failed: {:?}\nstderr: {}",
                args,
                String::from_utf8_lossy(&output.stderr)
            );
        }
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    /// Run the CLI and expect failure, returning stderr.
    pub async fn run_failure(&self, args: &[&str]) -> String {
        let output = self.run(args).await;
        if output.status.success() {
            panic!("CLI command should have failed: {:?}", args);
        }
        String::from_utf8_lossy(&output.stderr).to_string()
    }
}

fn read_json(path: &Path) -> Option<Value> {
    let json = std::fs::read_to_string(path).ok()?;
    Some(serde_json::from_str(&json).unwrap())
}

pub fn user_json() -> Value {
    json!({
        "id": "u_1",
        "email": "alice@example.com",
        "username": "alice",
        "firstName": "Alice",
        "lastName": "Smith",
        "role": "user",
        "status": "active",
        "emailVerified": true,
        "phoneVerified": false,
        "twoFactorEnabled": false
    })
}

pub fn ok(data: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "success": true, "data": data }))
}

pub fn failure(status: u16, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(json!({ "success": false, "message": message }))
}
