use std::path::Path;
use std::process::Stdio;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use aztec_demo_core::error::{AztecDemoError, Result};

use crate::wire::{Request, Response};

/// Run `<node> <script>` once, send `method`/`params` on stdin and decode the
/// result from stdout.
pub async fn invoke<P, T>(node: &str, script: &Path, method: &str, params: P) -> Result<T>
where
    P: Serialize,
    T: DeserializeOwned,
{
    tracing::debug!("{node} {} {method}", script.display());

    let request = serde_json::to_vec(&Request { method, params })
        .map_err(|e| AztecDemoError::Encoder(format!("cannot encode {method} request: {e}")))?;

    let mut child = match Command::new(node)
        .arg(script)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
    {
        Ok(child) => child,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(AztecDemoError::MissingTool {
                name: node.to_string(),
                install: "https://nodejs.org/".into(),
            })
        }
        Err(e) => {
            return Err(AztecDemoError::Encoder(format!("failed to run {node}: {e}")));
        }
    };

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(&request).await?;
        // dropping stdin closes the pipe so the script sees EOF
    }

    let out = child.wait_with_output().await?;
    if !out.status.success() {
        let stderr = String::from_utf8_lossy(&out.stderr);
        return Err(AztecDemoError::Encoder(format!(
            "{method} exited with {}:\nstderr: {stderr}",
            out.status
        )));
    }

    let response: Response = serde_json::from_slice(&out.stdout).map_err(|e| {
        AztecDemoError::Encoder(format!(
            "{method} returned invalid JSON ({e}): {}",
            String::from_utf8_lossy(&out.stdout)
        ))
    })?;
    if !response.ok {
        return Err(AztecDemoError::Encoder(format!(
            "{method}: {}",
            response.error.as_deref().unwrap_or("unknown error")
        )));
    }
    serde_json::from_value(response.result)
        .map_err(|e| AztecDemoError::Encoder(format!("{method} returned unexpected result: {e}")))
}
