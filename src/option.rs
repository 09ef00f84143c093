// ==============================================================================
// Recognized drafter Command-Line Options
// ==============================================================================
//
// drafter accepts a small, fixed set of long options. Modelling them as a closed
// enum keeps the builder's option map free of names the tool would reject as
// unknown: anything outside this set simply cannot be stored.

use std::fmt;
use std::str::FromStr;

use crate::error::DrafterError;
use crate::suggest::{levenshtein, max_edit_distance};

/// A command-line option understood by the `drafter` binary.
///
/// Options come in two shapes: flags, which render as a bare `--name`, and
/// valued options, which render as `--name=value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DrafterOption {
    /// `--output <path>`: write the result to a file instead of stdout.
    Output,
    /// `--version`: print the tool version and exit.
    Version,
    /// `--validate`: validate the input only, without emitting an AST.
    Validate,
    /// `--format <json|yaml>`: serialization of the emitted AST.
    Format,
    /// `--sourcemap <path>`: write a source map next to the AST.
    Sourcemap,
    /// `--use-line-num`: use line and column numbers in source maps.
    UseLineNum,
}

impl DrafterOption {
    /// Every recognized option, in drafter's `--help` order.
    pub const ALL: [DrafterOption; 6] = [
        DrafterOption::Output,
        DrafterOption::Version,
        DrafterOption::Validate,
        DrafterOption::Format,
        DrafterOption::Sourcemap,
        DrafterOption::UseLineNum,
    ];

    /// The option as it appears on the command line, including the leading
    /// `--`.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            DrafterOption::Output => "--output",
            DrafterOption::Version => "--version",
            DrafterOption::Validate => "--validate",
            DrafterOption::Format => "--format",
            DrafterOption::Sourcemap => "--sourcemap",
            DrafterOption::UseLineNum => "--use-line-num",
        }
    }

    /// Whether drafter expects a value after this option.
    #[must_use]
    pub fn takes_value(self) -> bool {
        matches!(
            self,
            DrafterOption::Output | DrafterOption::Format | DrafterOption::Sourcemap
        )
    }

    /// Render a single option/value pair into its command-line token.
    ///
    /// An empty value always renders as a bare flag, even for options that
    /// normally take one; drafter then reports the missing value itself.
    pub(crate) fn render(self, value: &str) -> String {
        if value.is_empty() {
            self.name().to_string()
        } else {
            format!("{}={value}", self.name())
        }
    }
}

impl fmt::Display for DrafterOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DrafterOption {
    type Err = DrafterError;

    /// Parse an option name. The leading `--` is optional, so both `--format`
    /// and `format` are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bare = s.strip_prefix("--").unwrap_or(s);
        if let Some(option) = DrafterOption::ALL
            .into_iter()
            .find(|o| &o.name()[2..] == bare)
        {
            return Ok(option);
        }

        let suggestion = DrafterOption::ALL
            .into_iter()
            .map(|o| (o, levenshtein(bare, &o.name()[2..])))
            .filter(|&(_, distance)| distance <= max_edit_distance(bare.len()))
            .min_by_key(|&(_, distance)| distance)
            .map(|(o, _)| o);

        Err(DrafterError::UnknownOption {
            name: s.to_string(),
            suggestion,
        })
    }
}
