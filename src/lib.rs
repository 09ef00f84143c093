//! Fluent command builder and runner for [drafter], the API Blueprint parser.
//!
//! drafter turns an API Blueprint document into an AST serialized as JSON or
//! YAML. This crate does not parse anything itself: it assembles a drafter
//! command line, runs the binary, and hands back its raw output.
//!
//! - [`Drafter`] is a non-consuming builder holding the executable, the input
//!   document and drafter's options. It can be reused across many runs.
//! - [`Invocation`] is a built command that can be inspected or customized
//!   before it is executed.
//!
//! # Parsing a blueprint
//!
//! ```no_run
//! use drafter::Drafter;
//!
//! let ast = Drafter::new()
//!     .input("blueprint.apib")
//!     .format("json")
//!     .run()?;
//! println!("{ast}");
//! # Ok::<(), drafter::DrafterError>(())
//! ```
//!
//! # Customizing the process before it runs
//!
//! ```no_run
//! use drafter::Drafter;
//!
//! let mut drafter = Drafter::with_binary("vendor/bin/drafter");
//! drafter.input("-").format("yaml");
//!
//! let mut invocation = drafter.build();
//! invocation.stdin("FORMAT: 1A\n\n# My API\n");
//! let ast = drafter.run_invocation(&invocation)?;
//! # Ok::<(), drafter::DrafterError>(())
//! ```
//!
//! # Error handling
//!
//! Failures are reported as [`DrafterError`], which separates launch
//! failures, a missing input argument and drafter's own rejections. It
//! implements [`miette::Diagnostic`], so it renders with codes and help text
//! when returned from a `miette::Result`.
//!
//! [drafter]: https://github.com/apiaryio/drafter

pub(crate) mod drafter;
pub(crate) mod error;
pub(crate) mod invocation;
pub(crate) mod option;
pub(crate) mod suggest;

pub use drafter::{BINARY_ENV, DEFAULT_BINARY, Drafter, ToolVersion, default_binary};
pub use error::DrafterError;
pub use invocation::Invocation;
pub use option::DrafterOption;
