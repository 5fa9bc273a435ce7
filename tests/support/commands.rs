//! Command helper methods for Test.

use super::{assert_success, stdout, Test};
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create a cryptenv command isolated from the caller's environment.
    ///
    /// The default key and payload entries are removed, colors are off and
    /// the working directory is the test directory.
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("cryptenv").expect("failed to find cryptenv binary");
        cmd.env_remove("CRYPTO_ENV");
        cmd.env_remove("CRYPTO_ENV_DECRYPT_KEY");
        cmd.env_remove("CRYPTENV_LOG");
        cmd.env_remove("CRYPTENV_CONFIG");
        cmd.env("NO_COLOR", "1");
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Run `cryptenv keygen` and return the key.
    pub fn keygen(&self) -> String {
        let output = self
            .cmd()
            .arg("keygen")
            .output()
            .expect("failed to run cryptenv keygen");
        assert_success(&output);
        stdout(&output).trim().to_string()
    }

    /// Shortcut for `cryptenv encrypt <path> --key <key>`.
    pub fn encrypt(&self, path: &str, key: &str) -> Output {
        self.cmd()
            .args(["encrypt", path, "--key", key])
            .output()
            .expect("failed to run cryptenv encrypt")
    }

    /// Encrypt a .env file and return the blob.
    pub fn encrypt_env(&self, contents: &str, key: &str) -> String {
        self.write(".env", contents);
        let output = self.encrypt(".env", key);
        assert_success(&output);
        stdout(&output).trim().to_string()
    }

    /// Shortcut for `cryptenv decrypt --payload <blob> --key <key>`.
    pub fn decrypt(&self, blob: &str, key: &str) -> Output {
        self.cmd()
            .args(["decrypt", "--payload", blob, "--key", key])
            .output()
            .expect("failed to run cryptenv decrypt")
    }

    /// Shortcut for `cryptenv run -- <command>` with the key and payload
    /// supplied through the default environment entries.
    pub fn run(&self, blob: &str, key: &str, command: &[&str]) -> Command {
        let mut cmd = self.cmd();
        cmd.env("CRYPTO_ENV", blob)
            .env("CRYPTO_ENV_DECRYPT_KEY", key)
            .arg("run")
            .arg("--")
            .args(command);
        cmd
    }
}
