//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create a sealpost command with an isolated environment.
    ///
    /// Returns a Command configured with:
    /// - HOME set to the temporary home directory
    /// - Current directory set to the test project directory
    /// - Ambient sealpost variables cleared
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("sealpost").expect("failed to find sealpost binary");
        cmd.env("HOME", self.home.path());
        cmd.env("USERPROFILE", self.home.path());
        cmd.env("NO_COLOR", "1");
        for var in [
            "SEALPOST_CONFIG",
            "SEALPOST_GNUPG_HOME",
            "SEALPOST_SMTP_PASSWORD",
            "SEALPOST_AUTH_PASSWORD",
            "SEALPOST_LOG",
        ] {
            cmd.env_remove(var);
        }
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Run `sealpost` with the given arguments.
    pub fn run(&self, args: &[&str]) -> Output {
        self.cmd()
            .args(args)
            .output()
            .expect("failed to run sealpost")
    }

    /// Shortcut for `sealpost send` to the given recipients.
    pub fn send(&self, subject: &str, body: &str, to: &[&str]) -> Output {
        let mut args = vec!["send", "--subject", subject, "--body", body];
        for addr in to {
            args.extend(["--to", addr]);
        }
        self.run(&args)
    }

    /// Shortcut for `sealpost template`.
    pub fn template(&self, name: &str, context: &str, to: &[&str]) -> Output {
        let mut args = vec![
            "template",
            "--subject",
            "Templated",
            "--template",
            name,
            "--context",
            context,
        ];
        for addr in to {
            args.extend(["--to", addr]);
        }
        self.run(&args)
    }

    /// Shortcut for `sealpost addresses --json`.
    pub fn addresses_json(&self) -> Output {
        self.run(&["addresses", "--json"])
    }
}
