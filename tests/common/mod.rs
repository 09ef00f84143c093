// ==============================================================================
// Shared Test Helpers
// ==============================================================================
//
// Integration tests run against `fixtures/fake-drafter.sh`, a POSIX shell
// stand-in for the real drafter binary that reproduces its command line and
// error messages. The script is installed once per test binary as an
// executable under `CARGO_TARGET_TMPDIR`.
//
// Each test file that imports this module compiles its own copy, so not every
// function is used in every binary.
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use serde_json::Value;

pub const FIXTURES: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

/// Path to an input fixture, as a `String` ready for `Drafter::input`.
pub fn fixture(name: &str) -> String {
    format!("{FIXTURES}/{name}")
}

/// Parse a JSON fixture for structural comparison.
pub fn load_json(name: &str) -> Value {
    let path = Path::new(FIXTURES).join(name);
    let content = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("failed to parse fixture {}: {e}", path.display()))
}

/// Install the fake drafter and return its path.
///
/// The script is written and closed exactly once, before any test gets hold
/// of the path, so no test can spawn it while it is still open for writing.
#[cfg(unix)]
pub fn fake_drafter() -> &'static Path {
    use std::os::unix::fs::PermissionsExt;

    static INSTALLED: OnceLock<PathBuf> = OnceLock::new();
    INSTALLED.get_or_init(|| {
        let template = fs::read_to_string(Path::new(FIXTURES).join("fake-drafter.sh"))
            .expect("read fake-drafter.sh");
        let script = template.replace("@FIXTURES@", FIXTURES);

        let dir = Path::new(env!("CARGO_TARGET_TMPDIR")).join(format!(
            "fake-drafter-{}",
            std::process::id()
        ));
        fs::create_dir_all(&dir).expect("create fake drafter directory");
        let path = dir.join("drafter");
        fs::write(&path, script).expect("write fake drafter");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
            .expect("make fake drafter executable");
        path
    })
}
