use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::process::{Command, Stdio};
use tempfile::tempdir;

fn aikido_mcp() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("aikido-mcp"));
    cmd.env_remove("AIKIDO_REGION")
        .env_remove("AIKIDO_API_BASE_URL")
        .env_remove("AIKIDO_CLIENT_ID")
        .env_remove("AIKIDO_CLIENT_SECRET");
    cmd
}

#[test]
fn help_lists_configuration_flags() {
    aikido_mcp()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--region"))
        .stdout(predicate::str::contains("--base-url"))
        .stdout(predicate::str::contains("--env-file"))
        .stdout(predicate::str::contains("--debug"));
}

#[test]
fn version_prints_package_version() {
    aikido_mcp()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn invalid_region_flag_is_rejected() {
    aikido_mcp()
        .args(["--region", "mars"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("mars"));
}

#[test]
fn missing_env_file_fails_startup() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let missing = temp.path().join("absent.env");

    aikido_mcp()
        .arg("--env-file")
        .arg(&missing)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error: Failed to load environment file"));

    Ok(())
}

#[test]
fn invalid_region_from_env_file_fails_startup() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let env_path = temp.path().join("aikido.env");
    fs::write(&env_path, "AIKIDO_REGION=mars\n")?;

    aikido_mcp()
        .arg("--env-file")
        .arg(&env_path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown region 'mars'"));

    Ok(())
}

fn read_response(stdout: &mut impl BufRead, id: u64) -> serde_json::Value {
    let mut line = String::new();
    loop {
        line.clear();
        let read = stdout.read_line(&mut line).expect("failed to read stdout");
        assert!(read > 0, "server closed stdout before answering request {id}");
        let message: serde_json::Value = match serde_json::from_str(line.trim()) {
            Ok(message) => message,
            Err(_) => continue,
        };
        if message["id"] == id {
            return message;
        }
    }
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn stdio_session_lists_and_calls_tools() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();

    let token = server
        .mock("POST", "/oauth/token")
        .with_status(200)
        .with_body(r#"{"access_token":"session-token","expires_in":3600,"token_type":"bearer"}"#)
        .expect(1)
        .create();
    let repos = server
        .mock("GET", "/public/v1/repositories/code")
        .match_query(mockito::Matcher::Any)
        .match_header("authorization", "Bearer session-token")
        .with_status(200)
        .with_body(
            r#"[
                {"id": 1, "name": "payments-api", "external_repo_id": "acme/payments-api"},
                {"id": 2, "name": "website", "external_repo_id": "acme/website"}
            ]"#,
        )
        .create();

    let mut child = aikido_mcp()
        .arg("--base-url")
        .arg(server.url())
        .env("AIKIDO_CLIENT_ID", "client")
        .env("AIKIDO_CLIENT_SECRET", "secret")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()?;

    let mut stdin = child.stdin.take().expect("stdin is piped");
    let mut stdout = BufReader::new(child.stdout.take().expect("stdout is piped"));

    let initialize = serde_json::json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "initialize",
        "params": {
            "protocolVersion": "2024-11-05",
            "capabilities": {},
            "clientInfo": { "name": "cli-test", "version": "0.0.0" }
        }
    });
    writeln!(stdin, "{}", initialize)?;
    let init = read_response(&mut stdout, 1);
    assert_eq!(init["result"]["serverInfo"]["name"], "aikido-mcp");

    writeln!(
        stdin,
        "{}",
        serde_json::json!({ "jsonrpc": "2.0", "method": "notifications/initialized" })
    )?;

    writeln!(
        stdin,
        "{}",
        serde_json::json!({ "jsonrpc": "2.0", "id": 2, "method": "tools/list" })
    )?;
    let list = read_response(&mut stdout, 2);
    assert_eq!(list["result"]["tools"].as_array().map(|t| t.len()), Some(6));

    writeln!(
        stdin,
        "{}",
        serde_json::json!({
            "jsonrpc": "2.0",
            "id": 3,
            "method": "tools/call",
            "params": { "name": "search_repository_by_name", "arguments": { "name": "PAYMENTS" } }
        })
    )?;
    let call = read_response(&mut stdout, 3);
    assert_eq!(call["result"]["isError"], false);
    let text = call["result"]["content"][0]["text"].as_str().unwrap_or_default();
    let body: serde_json::Value = serde_json::from_str(text)?;
    assert_eq!(body["total"], 1);
    assert_eq!(body["repositories"][0]["name"], "payments-api");

    drop(stdin);
    let _ = child.kill();
    let _ = child.wait();

    token.assert();
    repos.assert();
    Ok(())
}
