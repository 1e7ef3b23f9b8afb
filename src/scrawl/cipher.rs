use crate::error::{Result, ScrawlError};
use std::io::Write;
use std::process::{Command, Stdio};
use std::thread;
use tracing::debug;

/// Encryption capability for entry bodies.
///
/// `encrypt` must produce an ASCII-armored container that `decrypt` accepts.
pub trait Cipher {
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>>;
    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>>;
}

/// Shells out to `gpg`.
///
/// Encrypts to `key` when set, otherwise to the user's default key.
#[derive(Debug, Clone)]
pub struct GpgCipher {
    program: String,
    key: Option<String>,
}

impl GpgCipher {
    pub fn new(key: Option<String>) -> Self {
        Self {
            program: "gpg".to_string(),
            key,
        }
    }

    pub fn with_program(mut self, program: &str) -> Self {
        self.program = program.to_string();
        self
    }

    fn encrypt_args(&self) -> Vec<String> {
        let mut args: Vec<String> = ["--quiet", "--yes", "--armor", "--encrypt"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        match &self.key {
            Some(key) => {
                args.push("--recipient".to_string());
                args.push(key.clone());
            }
            None => args.push("--default-recipient-self".to_string()),
        }
        args
    }

    fn run(&self, args: &[String], input: &[u8]) -> Result<Vec<u8>> {
        debug!(program = %self.program, ?args, "running cipher");

        let mut child = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| {
                ScrawlError::Cipher(format!("Failed to launch '{}': {}", self.program, e))
            })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| ScrawlError::Cipher("Could not open cipher stdin".to_string()))?;
        let input = input.to_vec();
        // stdin is fed from a thread while stdout drains
        let writer = thread::spawn(move || stdin.write_all(&input));

        let output = child.wait_with_output()?;
        let written = writer
            .join()
            .map_err(|_| ScrawlError::Cipher("Cipher input thread panicked".to_string()))?;

        if !output.status.success() {
            return Err(ScrawlError::Cipher(format!(
                "'{}' exited with {}",
                self.program, output.status
            )));
        }
        written?;
        Ok(output.stdout)
    }
}

impl Cipher for GpgCipher {
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        self.run(&self.encrypt_args(), plaintext)
    }

    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        let args = vec!["--quiet".to_string(), "--decrypt".to_string()];
        self.run(&args, ciphertext)
    }
}
