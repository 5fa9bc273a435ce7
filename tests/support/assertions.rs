//! Checks over captured `cryptenv` output.

use std::process::Output;

use predicates::prelude::*;

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// Exit status 0, or panic with the child's stderr.
pub fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "cryptenv exited with {:?}:\n{}",
        output.status.code(),
        stderr(output)
    );
}

pub fn assert_failure(output: &Output) {
    assert!(
        !output.status.success(),
        "cryptenv succeeded unexpectedly, stdout: {}",
        stdout(output)
    );
}

/// Non-zero exit with `expected` in the error report.
pub fn assert_fails_with(output: &Output, expected: &str) {
    assert_failure(output);
    assert_stderr_contains(output, expected);
}

pub fn assert_stdout_contains(output: &Output, expected: &str) {
    let out = stdout(output);
    assert!(
        predicate::str::contains(expected).eval(out.as_str()),
        "stdout missing {:?}, got: {}",
        expected,
        out
    );
}

pub fn assert_stderr_contains(output: &Output, expected: &str) {
    let err = stderr(output);
    assert!(
        predicate::str::contains(expected).eval(err.as_str()),
        "stderr missing {:?}, got: {}",
        expected,
        err
    );
}

/// Neither stream mentions `secret`.
pub fn assert_not_leaked(output: &Output, secret: &str) {
    let leaked = predicate::str::contains(secret);
    assert!(!leaked.eval(stdout(output).as_str()), "stdout leaked {:?}", secret);
    assert!(!leaked.eval(stderr(output).as_str()), "stderr leaked {:?}", secret);
}
