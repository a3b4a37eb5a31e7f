//! aztec.js proof encoder for aztec-demo.
//!
//! AZTEC accounts, notes and proofs are built by the JavaScript library
//! [aztec.js](https://github.com/AztecProtocol/AZTEC). [`NodeEncoder`] runs
//! the bridge script written by `aztec-demo init` (`encoder/aztec-encoder.js`)
//! once per request, passing JSON on stdin and reading JSON from stdout.
//!
//! **Prerequisites**: `node`, plus `npm install` in the encoder directory

mod bridge;
mod wire;

use std::path::PathBuf;

use alloy::primitives::{Bytes, B256};
use async_trait::async_trait;
use serde_json::json;

use aztec_demo_core::encoder::{
    owner_address, AztecAccount, EncodedProof, JoinSplitRequest, MintRequest, Note,
    PrerequisiteError, ProofEncoder,
};
use aztec_demo_core::error::{AztecDemoError, Result};

use crate::wire::{CreateNoteParams, JoinSplitParams, MintParams, WireCrs, WireProof};

/// [`ProofEncoder`] backed by `node aztec-encoder.js`.
#[derive(Debug, Clone)]
pub struct NodeEncoder {
    node: String,
    script: PathBuf,
}

impl NodeEncoder {
    pub fn new(node: impl Into<String>, script: impl Into<PathBuf>) -> Self {
        Self {
            node: node.into(),
            script: script.into(),
        }
    }

    async fn invoke<P, T>(&self, method: &str, params: P) -> Result<T>
    where
        P: serde::Serialize + Send,
        T: serde::de::DeserializeOwned,
    {
        bridge::invoke(&self.node, &self.script, method, params).await
    }
}

#[async_trait]
impl ProofEncoder for NodeEncoder {
    fn name(&self) -> &'static str {
        "aztec.js"
    }

    fn check_prerequisites(&self) -> std::result::Result<(), Vec<PrerequisiteError>> {
        let mut missing = Vec::new();

        if which::which(&self.node).is_err() {
            missing.push(PrerequisiteError {
                tool_name: self.node.clone(),
                install_instructions: "https://nodejs.org/".into(),
            });
        }

        if !self.script.is_file() {
            missing.push(PrerequisiteError {
                tool_name: self.script.display().to_string(),
                install_instructions: "aztec-demo init <dir>".into(),
            });
        } else if let Some(dir) = self.script.parent() {
            if !dir.join("node_modules/aztec.js").is_dir() {
                missing.push(PrerequisiteError {
                    tool_name: "aztec.js".into(),
                    install_instructions: format!("cd {} && npm install", dir.display()),
                });
            }
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(missing)
        }
    }

    async fn generate_account(&self) -> Result<AztecAccount> {
        self.invoke("generateAccount", json!({})).await
    }

    async fn create_note(&self, owner_public_key: &Bytes, value: u64) -> Result<Note> {
        let note: Note = self
            .invoke(
                "createNote",
                CreateNoteParams {
                    public_key: owner_public_key,
                    value,
                },
            )
            .await?;
        if note.value != value {
            return Err(AztecDemoError::Encoder(format!(
                "createNote returned value {} for {value}",
                note.value
            )));
        }
        if let Some(expected) = owner_address(owner_public_key) {
            if note.owner != expected {
                return Err(AztecDemoError::Encoder(format!(
                    "createNote returned owner {} for public key of {expected}",
                    note.owner
                )));
            }
        }
        Ok(note)
    }

    async fn create_zero_value_note(&self) -> Result<Note> {
        self.invoke("createZeroValueNote", json!({})).await
    }

    async fn common_reference_string(&self) -> Result<[B256; 6]> {
        let crs: WireCrs = self.invoke("commonReferenceString", json!({})).await?;
        let len = crs.len();
        <[B256; 6]>::try_from(crs).map_err(|_| {
            AztecDemoError::Encoder(format!("common reference string has {len} words, expected 6"))
        })
    }

    async fn encode_mint(&self, request: &MintRequest) -> Result<EncodedProof> {
        let proof: WireProof = self.invoke("encodeMint", MintParams::from(request)).await?;
        Ok(proof.into())
    }

    async fn encode_join_split(&self, request: &JoinSplitRequest) -> Result<EncodedProof> {
        let proof: WireProof = self
            .invoke("encodeJoinSplit", JoinSplitParams::from(request))
            .await?;
        tracing::debug!(
            "join-split proof: {} bytes, {} bytes of expected output",
            proof.proof_data.len(),
            proof.expected_output.len()
        );
        Ok(proof.into())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use alloy::primitives::{hex, Address};
    use std::path::Path;

    /// A stand-in bridge: `sh <script>` drains stdin and prints `response`.
    fn fake_bridge(dir: &Path, response: &str) -> NodeEncoder {
        let script = dir.join("bridge.sh");
        std::fs::write(
            &script,
            format!("cat > /dev/null\nprintf '%s' '{response}'\n"),
        )
        .unwrap();
        NodeEncoder::new("sh", script)
    }

    #[tokio::test]
    async fn test_missing_node_binary() {
        let encoder = NodeEncoder::new("definitely-not-node-binary", "aztec-encoder.js");
        let err = encoder.generate_account().await.unwrap_err();
        match err {
            AztecDemoError::MissingTool { name, .. } => {
                assert_eq!(name, "definitely-not-node-binary")
            }
            other => panic!("expected MissingTool, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_generate_account_parses_result() {
        let dir = tempfile::tempdir().unwrap();
        let address = Address::repeat_byte(0x11);
        let response = format!(
            r#"{{"ok":true,"result":{{"address":"{address}","publicKey":"0x04aa","privateKey":"0x{}"}}}}"#,
            "22".repeat(32)
        );
        let encoder = fake_bridge(dir.path(), &response);
        let account = encoder.generate_account().await.unwrap();
        assert_eq!(account.address, address);
        assert_eq!(account.public_key.as_ref(), &[0x04, 0xaa]);
        assert_eq!(account.private_key, B256::repeat_byte(0x22));
    }

    #[tokio::test]
    async fn test_error_response_becomes_encoder_error() {
        let dir = tempfile::tempdir().unwrap();
        let encoder = fake_bridge(dir.path(), r#"{"ok":false,"error":"invalid viewing key"}"#);
        let err = encoder.create_zero_value_note().await.unwrap_err();
        assert!(matches!(err, AztecDemoError::Encoder(ref m) if m.contains("invalid viewing key")));
    }

    #[tokio::test]
    async fn test_short_crs_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let word = format!("\"0x{}\"", "01".repeat(32));
        let encoder = fake_bridge(dir.path(), &format!(r#"{{"ok":true,"result":[{word},{word}]}}"#));
        let err = encoder.common_reference_string().await.unwrap_err();
        assert!(err.to_string().contains("2 words"));
    }

    #[tokio::test]
    async fn test_nonzero_exit_reports_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("bridge.sh");
        std::fs::write(&script, "cat > /dev/null\necho 'Cannot find module aztec.js' >&2\nexit 3\n")
            .unwrap();
        let encoder = NodeEncoder::new("sh", script);
        let err = encoder.generate_account().await.unwrap_err();
        assert!(err.to_string().contains("Cannot find module"));
    }

    #[tokio::test]
    async fn test_note_value_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let response = format!(
            r#"{{"ok":true,"result":{{"publicKey":"0x04","owner":"{}","viewingKey":"0x05","noteHash":"0x{}","value":7}}}}"#,
            Address::ZERO,
            "33".repeat(32)
        );
        let encoder = fake_bridge(dir.path(), &response);
        let err = encoder
            .create_note(&Bytes::from_static(&[4]), 8)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("value 7 for 8"));
    }

    fn note_response(public_key: &str, owner: Address) -> String {
        format!(
            r#"{{"ok":true,"result":{{"publicKey":"{public_key}","owner":"{owner}","viewingKey":"0x05","noteHash":"0x{}","value":8}}}}"#,
            "33".repeat(32)
        )
    }

    #[tokio::test]
    async fn test_note_keeps_owner_of_public_key() {
        let dir = tempfile::tempdir().unwrap();
        let public_key = Bytes::from([&[0x04][..], &[0x5a; 64][..]].concat());
        let owner = owner_address(&public_key).unwrap();
        let encoder = fake_bridge(dir.path(), &note_response(&hex::encode_prefixed(&public_key), owner));

        let note = encoder.create_note(&public_key, 8).await.unwrap();
        assert_eq!(note.owner, owner);

        // the owner goes back to the bridge with the note
        let request = JoinSplitRequest {
            input_notes: vec![note],
            output_notes: vec![],
            sender: Address::ZERO,
            input_note_owners: vec![],
            public_owner: Address::ZERO,
            k_public: 8,
            validator: Address::ZERO,
        };
        let params = JoinSplitParams::from(&request);
        let json = serde_json::to_value(&params).unwrap();
        let sent: Address = serde_json::from_value(json["inputNotes"][0]["owner"].clone()).unwrap();
        assert_eq!(sent, owner);
    }

    #[tokio::test]
    async fn test_note_with_wrong_owner_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let public_key = Bytes::from([&[0x04][..], &[0x5a; 64][..]].concat());
        let encoder = fake_bridge(
            dir.path(),
            &note_response(&hex::encode_prefixed(&public_key), Address::ZERO),
        );
        let err = encoder.create_note(&public_key, 8).await.unwrap_err();
        assert!(err.to_string().contains("returned owner"));
    }

    #[test]
    fn test_prerequisites_report_missing_script() {
        let dir = tempfile::tempdir().unwrap();
        let encoder = NodeEncoder::new("sh", dir.path().join("missing.js"));
        let missing = encoder.check_prerequisites().unwrap_err();
        assert!(missing
            .iter()
            .any(|m| m.install_instructions.contains("aztec-demo init")));
    }

    #[test]
    fn test_prerequisites_report_missing_node_modules() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("aztec-encoder.js");
        std::fs::write(&script, "").unwrap();
        let missing = NodeEncoder::new("sh", script).check_prerequisites().unwrap_err();
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].tool_name, "aztec.js");
    }
}
