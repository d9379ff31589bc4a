#[cfg(test)]
mod tests {
    use assert_cmd::Command;
    use predicates::prelude::*;

    fn relkit() -> Command {
        Command::cargo_bin("relkit").unwrap()
    }

    #[test]
    fn no_command_prints_usage_and_fails() {
        let temp = tempfile::tempdir().unwrap();
        relkit()
            .current_dir(temp.path())
            .assert()
            .failure()
            .stdout(predicate::str::contains("Usage: relkit"))
            .stderr(predicate::str::contains("no command given"));
    }

    #[test]
    fn unknown_command_lists_known_ones() {
        let temp = tempfile::tempdir().unwrap();
        relkit()
            .current_dir(temp.path())
            .arg("deploy")
            .assert()
            .failure()
            .stderr(predicate::str::contains("unknown command 'deploy'"))
            .stderr(predicate::str::contains("release"));
    }

    #[test]
    fn missing_required_parameter_is_a_parse_error() {
        let temp = tempfile::tempdir().unwrap();
        relkit()
            .current_dir(temp.path())
            .arg("release")
            .assert()
            .failure()
            .stderr(predicate::str::contains("missing required parameter <platform>"));
    }

    #[test]
    fn overflow_positional_tokens_are_rejected() {
        let temp = tempfile::tempdir().unwrap();
        relkit()
            .current_dir(temp.path())
            .args(["release", "github", "main", "extra"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("expected 2 parameters, but found 3"));
    }

    #[test]
    fn argument_missing_its_value_is_reported() {
        let temp = tempfile::tempdir().unwrap();
        relkit()
            .current_dir(temp.path())
            .args(["release", "github", "--token"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("no value passed to --token"));
    }

    #[test]
    fn init_writes_config_and_refuses_to_clobber() {
        let temp = tempfile::tempdir().unwrap();

        relkit()
            .current_dir(temp.path())
            .arg("init")
            .assert()
            .success()
            .stdout(predicate::str::contains(".relkit.toml"));
        assert!(temp.path().join(".relkit.toml").is_file());

        // A second init halts in the main hook but still exits cleanly
        relkit()
            .current_dir(temp.path())
            .arg("init")
            .assert()
            .success()
            .stdout(predicate::str::contains("already exists"));

        relkit()
            .current_dir(temp.path())
            .args(["init", "--force"])
            .assert()
            .success();
    }

    #[test]
    fn unsupported_platform_fails_in_before() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::write(
            temp.path().join(".relkit.toml"),
            "repository = \"acme/widget\"\n",
        )
        .unwrap();

        relkit()
            .current_dir(temp.path())
            .args(["release", "sourceforge", "--dry-run"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("unsupported platform 'sourceforge'"));
    }

    #[test]
    fn invalid_level_fails_validation() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::write(
            temp.path().join(".relkit.toml"),
            "repository = \"acme/widget\"\n",
        )
        .unwrap();

        relkit()
            .current_dir(temp.path())
            .args(["release", "github", "--dry-run", "--level", "gigantic"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("'level' failed validation"));
    }

    #[test]
    fn dry_run_release_touches_nothing() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::write(
            temp.path().join(".relkit.toml"),
            "repository = \"acme/widget\"\nbranch = \"main\"\n",
        )
        .unwrap();

        relkit()
            .current_dir(temp.path())
            .args(["release", "github", "--dry-run"])
            .assert()
            .success()
            .stdout(predicate::str::contains("would tag"))
            .stdout(predicate::str::contains("dry run, nothing was published"));
    }
}
