// ==============================================================================
// `Drafter` Builder: Accumulate drafter Options, Then Run
// ==============================================================================
//
// `Drafter` follows the non-consuming `&mut self` builder pattern (C-BUILDER),
// like `std::process::Command`: configuration and terminal methods both take
// `&mut self`, so one builder serves chained one-liners, multi-step setup and
// repeated runs. Nothing is cleared implicitly between runs; `reset_input` and
// `reset_options` are the only ways to drop state.
//
// Rendering and execution are split: `render` produces the argument vector,
// `build` freezes it into an `Invocation`, and `run` executes that.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;

use crate::error::DrafterError;
use crate::invocation::Invocation;
use crate::option::DrafterOption;

/// Environment variable that overrides the default drafter executable.
pub const BINARY_ENV: &str = "DRAFTER_BIN";

/// Executable used when neither [`Drafter::with_binary`] nor [`BINARY_ENV`]
/// says otherwise. Resolved through `PATH` at spawn time.
pub const DEFAULT_BINARY: &str = "drafter";

/// The default drafter executable: `$DRAFTER_BIN` if set and non-empty,
/// otherwise `drafter` on `PATH`.
#[must_use]
pub fn default_binary() -> PathBuf {
    match std::env::var_os(BINARY_ENV) {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => PathBuf::from(DEFAULT_BINARY),
    }
}

/// Builder for a drafter command line.
///
/// # Examples
///
/// ```no_run
/// use drafter::Drafter;
///
/// // One-liner with chaining:
/// let ast = Drafter::new()
///     .input("blueprint.apib")
///     .format("json")
///     .run()?;
///
/// // Multi-step configuration, then re-running without reconfiguring:
/// let mut drafter = Drafter::with_binary("vendor/bin/drafter");
/// drafter.input("blueprint.apib");
/// drafter.format("yaml").use_line_num();
/// let first = drafter.run()?;
/// let second = drafter.run()?;
/// # Ok::<(), drafter::DrafterError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Drafter {
    binary: PathBuf,
    input: Option<String>,
    options: IndexMap<DrafterOption, String>,
}

impl Default for Drafter {
    fn default() -> Self {
        Self::new()
    }
}

impl Drafter {
    /// Create a builder for the [default binary](default_binary) with no input
    /// and no options.
    #[must_use]
    pub fn new() -> Self {
        Self::with_binary(default_binary())
    }

    /// Create a builder for a specific drafter executable.
    #[must_use]
    pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
        Drafter {
            binary: binary.into(),
            input: None,
            options: IndexMap::new(),
        }
    }

    // ==========================================================================
    // Executable and Input
    // ==========================================================================

    /// Replace the executable. Existence is only checked when the command runs.
    pub fn set_binary(&mut self, binary: impl Into<PathBuf>) -> &mut Self {
        self.binary = binary.into();
        self
    }

    #[must_use]
    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Set the input document: a file path, or `-` for standard input.
    /// Replaces any previous input.
    pub fn input(&mut self, input: impl Into<String>) -> &mut Self {
        self.input = Some(input.into());
        self
    }

    /// The current input argument, or `None` if none is set.
    #[must_use]
    pub fn get_input(&self) -> Option<&str> {
        self.input.as_deref()
    }

    pub fn reset_input(&mut self) -> &mut Self {
        self.input = None;
        self
    }

    // ==========================================================================
    // Options
    // ==========================================================================

    /// Set `option` to `value`. An empty value makes it a bare flag.
    ///
    /// Setting an option that is already present overwrites its value but
    /// keeps its original position in the rendered command line.
    pub fn set_option(&mut self, option: DrafterOption, value: impl Into<String>) -> &mut Self {
        self.options.insert(option, value.into());
        self
    }

    /// Set `option` as a value-less flag.
    pub fn set_flag(&mut self, option: DrafterOption) -> &mut Self {
        self.set_option(option, String::new())
    }

    /// All options set so far, in the order they were first set.
    #[must_use]
    pub fn options(&self) -> &IndexMap<DrafterOption, String> {
        &self.options
    }

    pub fn reset_options(&mut self) -> &mut Self {
        self.options.clear();
        self
    }

    /// `--version`: print drafter's version instead of parsing.
    pub fn version(&mut self) -> &mut Self {
        self.set_flag(DrafterOption::Version)
    }

    /// `--validate`: validate the input without emitting an AST.
    pub fn validate(&mut self) -> &mut Self {
        self.set_flag(DrafterOption::Validate)
    }

    /// `--format`: `json` or `yaml`. Other values are passed through and
    /// rejected by drafter itself.
    pub fn format(&mut self, format: impl Into<String>) -> &mut Self {
        self.set_option(DrafterOption::Format, format)
    }

    /// `--output`: have drafter write the AST to `path` instead of stdout.
    pub fn output(&mut self, path: impl Into<String>) -> &mut Self {
        self.set_option(DrafterOption::Output, path)
    }

    /// `--sourcemap`: have drafter write a source map to `path`.
    pub fn sourcemap(&mut self, path: impl Into<String>) -> &mut Self {
        self.set_option(DrafterOption::Sourcemap, path)
    }

    /// `--use-line-num`: line/column source map positions instead of byte
    /// offsets.
    pub fn use_line_num(&mut self) -> &mut Self {
        self.set_flag(DrafterOption::UseLineNum)
    }

    // ==========================================================================
    // Rendering and Execution
    // ==========================================================================

    /// Render the command line: executable, options in first-set order, then
    /// the input argument if one is set. Does not modify the builder.
    #[must_use]
    pub fn render(&self) -> Vec<String> {
        std::iter::once(self.binary.display().to_string())
            .chain(self.render_args())
            .collect()
    }

    fn render_args(&self) -> Vec<String> {
        self.options
            .iter()
            .map(|(option, value)| option.render(value))
            .chain(self.input.clone())
            .collect()
    }

    /// Freeze the current state into an [`Invocation`] rooted at the current
    /// working directory, without running it.
    #[must_use]
    pub fn build(&self) -> Invocation {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Invocation::new(self.binary.clone(), self.render_args(), cwd)
    }

    /// Whether the current state is enough to run. `--version` is the only
    /// option that makes drafter ignore its input, so it is the only one that
    /// stands in for a missing input argument.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.input.is_some() || self.options.contains_key(&DrafterOption::Version)
    }

    /// Build and execute the command, returning drafter's stdout unmodified.
    ///
    /// The builder keeps its state, so calling `run` again re-executes the same
    /// command.
    ///
    /// # Errors
    ///
    /// - [`DrafterError::InputMissing`] if no input is set and `--version` is
    ///   not either. Nothing is spawned in that case.
    /// - [`DrafterError::Launch`] if the executable cannot be spawned.
    /// - [`DrafterError::ExternalTool`] if drafter exits unsuccessfully; the
    ///   error carries its stderr.
    pub fn run(&self) -> Result<String, DrafterError> {
        if !self.is_ready() {
            return Err(DrafterError::InputMissing);
        }
        self.build().execute()
    }

    /// Execute a previously built (and possibly customized) [`Invocation`]
    /// as-is, ignoring the builder's current state.
    ///
    /// # Errors
    ///
    /// Same as [`Invocation::execute`].
    pub fn run_invocation(&self, invocation: &Invocation) -> Result<String, DrafterError> {
        invocation.execute()
    }

    /// Ask the configured executable for its version.
    ///
    /// Runs `<binary> --version` on a scratch copy of this builder, so the
    /// input and options set here are left untouched.
    ///
    /// # Errors
    ///
    /// Launch and tool failures as for [`run`](Self::run), or
    /// [`DrafterError::ExternalTool`] if the output holds no `vX.Y.Z` version.
    pub fn tool_version(&self) -> Result<ToolVersion, DrafterError> {
        let mut probe = Drafter::with_binary(self.binary.clone());
        let stdout = probe.version().run()?;
        ToolVersion::parse(&stdout).ok_or_else(|| DrafterError::ExternalTool {
            status: Some(0),
            stderr: format!("unrecognized drafter version output: {:?}", stdout.trim()),
        })
    }
}

// ==============================================================================
// Tool Version
// ==============================================================================

static VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"v(\d+)\.(\d+)\.(\d+)").expect("valid regex"));

/// A drafter release number, as printed by `drafter --version`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ToolVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl ToolVersion {
    /// Extract the first `vX.Y.Z` in `text`.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let caps = VERSION_RE.captures(text)?;
        Some(ToolVersion {
            major: caps[1].parse().ok()?,
            minor: caps[2].parse().ok()?,
            patch: caps[3].parse().ok()?,
        })
    }
}

impl std::fmt::Display for ToolVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "v{}.{}.{}", self.major, self.minor, self.patch)
    }
}
