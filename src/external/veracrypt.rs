//! Client for the `veracrypt` command-line interface

use super::diagnostics::{StderrVerdict, classify_stderr, mentions_error};
use super::runner::{CapturedOutput, CommandRunner, Invocation};
use crate::config::VeraCryptSettings;
use crate::secret::Secret;
use anyhow::Result;
use std::path::Path;

/// Arguments for rotating a container's password
pub struct KeyChange<'a> {
    pub container: &'a Path,
    pub old_password: &'a Secret,
    pub new_password: &'a Secret,
    pub random_source: &'a Path,
}

pub struct VeraCrypt<'a> {
    runner: &'a dyn CommandRunner,
    settings: &'a VeraCryptSettings,
    ignored_warnings: &'a [String],
}

impl<'a> VeraCrypt<'a> {
    pub fn new(
        runner: &'a dyn CommandRunner,
        settings: &'a VeraCryptSettings,
        ignored_warnings: &'a [String],
    ) -> Self {
        Self {
            runner,
            settings,
            ignored_warnings,
        }
    }

    pub fn mount_invocation(&self, partition: &Path, mount_point: &Path, password: &Secret) -> Invocation {
        Invocation::new(&self.settings.program)
            .args(["--text", "--non-interactive", "--password"])
            .secret_arg(password)
            .arg(path_arg(partition))
            .arg(path_arg(mount_point))
    }

    pub fn change_key_invocation(&self, change: &KeyChange<'_>) -> Invocation {
        Invocation::new(&self.settings.program)
            .args(["-t", "-C", "--non-interactive", "--password"])
            .secret_arg(change.old_password)
            .arg("--new-password")
            .secret_arg(change.new_password)
            .arg("--pim")
            .arg(self.settings.pim.to_string())
            .arg("--new-pim")
            .arg(self.settings.new_pim.to_string())
            .arg("--random-source")
            .arg(path_arg(change.random_source))
            .arg(path_arg(change.container))
    }

    /// Mount `partition` at `mount_point`; returns veracrypt's stdout
    pub fn mount(&self, partition: &Path, mount_point: &Path, password: &Secret) -> Result<String> {
        let output = self
            .runner
            .run(&self.mount_invocation(partition, mount_point, password))?;
        self.check(output)
    }

    /// Change the password of an unmounted container; returns veracrypt's stdout
    pub fn change_key(&self, change: &KeyChange<'_>) -> Result<String> {
        let output = self.runner.run(&self.change_key_invocation(change))?;
        self.check(output)
    }

    fn check(&self, output: CapturedOutput) -> Result<String> {
        if !output.success() {
            // Everything veracrypt said, benign warnings included
            let text = [output.stderr.trim(), output.stdout.trim()]
                .into_iter()
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>()
                .join("\n");
            if text.is_empty() {
                anyhow::bail!("ERROR: veracrypt exited with status {:?}", output.code);
            }
            anyhow::bail!("ERROR: {text}");
        }

        match classify_stderr(&output.stderr, self.ignored_warnings) {
            StderrVerdict::Failure(text) => anyhow::bail!("ERROR: {text}"),
            StderrVerdict::Suppressed(text) => {
                tracing::debug!(warning = %text, "suppressed veracrypt warning");
            }
            StderrVerdict::Clean => {}
        }

        let stdout = output.stdout.trim().to_string();
        if mentions_error(&stdout) {
            anyhow::bail!("ERROR: {stdout}");
        }
        Ok(stdout)
    }
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::external::mock::{MockRunner, ok, with_stderr};
    use std::path::PathBuf;

    fn settings() -> Settings {
        Settings::defaults().unwrap()
    }

    #[test]
    fn test_mount_argument_order() {
        let runner = MockRunner::with_responses(vec![ok("")]);
        let settings = settings();
        let vc = VeraCrypt::new(&runner, &settings.veracrypt, &settings.pass.ignored_warnings);

        vc.mount(Path::new("/dev/sdb1"), Path::new("/mnt/usb"), &Secret::new("pw"))
            .unwrap();

        assert_eq!(
            runner.argvs()[0],
            vec![
                "veracrypt",
                "--text",
                "--non-interactive",
                "--password",
                "pw",
                "/dev/sdb1",
                "/mnt/usb"
            ]
        );
    }

    #[test]
    fn test_change_key_argument_order() {
        let settings = settings();
        let runner = MockRunner::new();
        let vc = VeraCrypt::new(&runner, &settings.veracrypt, &settings.pass.ignored_warnings);
        let old = Secret::new("old");
        let new = Secret::new("new");
        let random = PathBuf::from("/tmp/random.txt");

        let invocation = vc.change_key_invocation(&KeyChange {
            container: Path::new("/data/vault.hc"),
            old_password: &old,
            new_password: &new,
            random_source: &random,
        });

        assert_eq!(
            invocation.argv(),
            vec![
                "-t",
                "-C",
                "--non-interactive",
                "--password",
                "old",
                "--new-password",
                "new",
                "--pim",
                "0",
                "--new-pim",
                "0",
                "--random-source",
                "/tmp/random.txt",
                "/data/vault.hc"
            ]
        );
        let shown = invocation.to_string();
        assert!(!shown.contains(" old "));
        assert!(!shown.contains(" new "));
    }

    #[test]
    fn test_configured_pim_is_passed() {
        let mut settings = settings();
        settings.veracrypt.pim = 485;
        settings.veracrypt.new_pim = 500;
        let runner = MockRunner::new();
        let vc = VeraCrypt::new(&runner, &settings.veracrypt, &settings.pass.ignored_warnings);
        let pw = Secret::new("x");

        let argv = vc
            .change_key_invocation(&KeyChange {
                container: Path::new("c"),
                old_password: &pw,
                new_password: &pw,
                random_source: Path::new("r"),
            })
            .argv()
            .into_iter()
            .map(str::to_string)
            .collect::<Vec<_>>();

        let pim = argv.iter().position(|a| a == "--pim").unwrap();
        assert_eq!(argv[pim + 1], "485");
        let new_pim = argv.iter().position(|a| a == "--new-pim").unwrap();
        assert_eq!(argv[new_pim + 1], "500");
    }

    #[test]
    fn test_stderr_is_an_error() {
        let runner = MockRunner::with_responses(vec![with_stderr(
            1,
            "",
            "Error: Incorrect password or not a VeraCrypt volume.\n",
        )]);
        let settings = settings();
        let vc = VeraCrypt::new(&runner, &settings.veracrypt, &settings.pass.ignored_warnings);

        let err = vc
            .mount(Path::new("/dev/sdb1"), Path::new("/mnt"), &Secret::new("bad"))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "ERROR: Error: Incorrect password or not a VeraCrypt volume."
        );
    }

    #[test]
    fn test_failure_next_to_benign_warning_keeps_raw_text() {
        let runner = MockRunner::with_responses(vec![with_stderr(
            1,
            "Incorrect password or not a VeraCrypt volume.\n",
            "gpg: WARNING: unsafe ownership on homedir\n",
        )]);
        let settings = settings();
        let vc = VeraCrypt::new(&runner, &settings.veracrypt, &settings.pass.ignored_warnings);

        let err = vc
            .mount(Path::new("a"), Path::new("b"), &Secret::new("pw"))
            .unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("ERROR: gpg: WARNING"));
        assert!(message.contains("Incorrect password or not a VeraCrypt volume."));
    }

    #[test]
    fn test_error_word_in_stdout_is_an_error() {
        let runner = MockRunner::with_responses(vec![ok("Error: volume already mounted\n")]);
        let settings = settings();
        let vc = VeraCrypt::new(&runner, &settings.veracrypt, &settings.pass.ignored_warnings);

        let result = vc.mount(Path::new("a"), Path::new("b"), &Secret::new("pw"));
        assert!(result.is_err());
    }

    #[test]
    fn test_benign_warning_does_not_fail() {
        let runner = MockRunner::with_responses(vec![with_stderr(
            0,
            "Volume mounted.\n",
            "gpg: WARNING: something harmless\n",
        )]);
        let settings = settings();
        let vc = VeraCrypt::new(&runner, &settings.veracrypt, &settings.pass.ignored_warnings);

        let stdout = vc
            .mount(Path::new("a"), Path::new("b"), &Secret::new("pw"))
            .unwrap();
        assert_eq!(stdout, "Volume mounted.");
    }

    #[test]
    fn test_silent_nonzero_exit_fails() {
        let runner = MockRunner::with_responses(vec![with_stderr(5, "", "")]);
        let settings = settings();
        let vc = VeraCrypt::new(&runner, &settings.veracrypt, &settings.pass.ignored_warnings);

        let err = vc
            .mount(Path::new("a"), Path::new("b"), &Secret::new("pw"))
            .unwrap_err();
        assert!(err.to_string().contains("status Some(5)"));
    }
}
