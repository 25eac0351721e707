//! Standard options shared by every flocker command.
//!
//! Any clap [`Args`] schema can be augmented with the same cross-cutting
//! flags:
//!
//! - `--version` prints the framework version to stdout and stops parsing
//!   before anything else is validated
//! - `-v`/`--verbose` may be repeated; each occurrence adds one to
//!   [`Options::verbosity`]
//!
//! [`standard_options`] is the augmentation itself, working on a plain clap
//! [`Command`]. [`StandardOptions`] wraps a schema type together with the
//! streams and [`ProcessContext`] it was built with, and turns an argument list
//! into parsed [`Options`].
//!
//! ```rust,ignore
//! use clap::Args;
//! use flocker_script::{OptionSchema, ProcessContext, StandardOptions};
//!
//! #[derive(Args, Debug)]
//! struct HelloOptions {
//!     #[arg(long)]
//!     hello: Option<String>,
//! }
//!
//! impl OptionSchema for HelloOptions {
//!     const NAME: &'static str = "hello";
//! }
//!
//! let options = StandardOptions::<HelloOptions>::new(ProcessContext::captured(["hello"]))
//!     .parse_options(["-v", "--hello", "world"])?;
//! assert_eq!(options.verbosity(), 1);
//! assert_eq!(options.hello.as_deref(), Some("world"));
//! ```

use std::ffi::OsString;
use std::marker::PhantomData;
use std::ops::Deref;

use clap::error::ErrorKind;
use clap::{Arg, ArgAction, ArgMatches, Args, Command, FromArgMatches, value_parser};
use tracing::debug;

use crate::VERSION;
use crate::context::{OutputStream, ProcessContext};
use crate::error::{ParseInterrupt, UsageError};
use crate::verbosity::Verbosity;

/// Argument id under which each verbosity flag is recorded.
pub const VERBOSITY_ID: &str = "verbosity";

/// Argument id of the version flag.
pub const VERSION_ID: &str = "version";

const VERSION_FLAG: &str = "--version";

/// Help layout putting the synopsis first, so help always starts with
/// `Usage: <command-name>`.
const HELP_TEMPLATE: &str = "{usage-heading} {usage}\n{about-with-newline}\n{all-args}{after-help}";

/// A typed command-line schema.
///
/// Implementors are clap [`Args`] types; the trait adds the command name used
/// in the synopsis and a validation hook run after parsing.
pub trait OptionSchema: Args {
    /// Command name shown in `Usage: <name>`.
    const NAME: &'static str;

    /// The bare clap command for this schema, before augmentation.
    fn command() -> Command {
        Self::augment_args(Command::new(Self::NAME))
    }

    /// Validate the parsed values as a whole.
    ///
    /// Errors are reported exactly like malformed arguments.
    fn post_options(&mut self) -> Result<(), UsageError> {
        Ok(())
    }
}

/// Add the standard flags to `command`.
///
/// An argument is only added when neither its id nor its long name is already
/// in use; when only the short `-v` is taken, `--verbose` is added without it.
/// Applying the augmentation twice is the same as applying it once.
pub fn standard_options(command: Command) -> Command {
    let command = command
        .no_binary_name(true)
        .disable_version_flag(true)
        .help_template(HELP_TEMPLATE);

    let version = Arg::new(VERSION_ID)
        .long("version")
        .action(ArgAction::SetTrue)
        .help("Print the version and exit");
    // One value per occurrence; `ArgAction::Count` stops at `u8::MAX`.
    let verbosity = Arg::new(VERBOSITY_ID)
        .short('v')
        .long("verbose")
        .action(ArgAction::Append)
        .num_args(0)
        .default_missing_value("true")
        .value_parser(value_parser!(bool))
        .help("Increase the verbosity; may be given more than once");

    add_if_free(add_if_free(command, version), verbosity)
}

fn add_if_free(command: Command, arg: Arg) -> Command {
    let taken = command.get_arguments().any(|existing| {
        existing.get_id() == arg.get_id()
            || (arg.get_long().is_some() && existing.get_long() == arg.get_long())
    });
    if taken {
        return command;
    }

    let short_taken = arg.get_short().is_some_and(|short| {
        command
            .get_arguments()
            .any(|existing| existing.get_short() == Some(short))
    });
    if short_taken {
        command.arg(arg.short(None::<char>))
    } else {
        command.arg(arg)
    }
}

/// Whether `--version` appears before any `--` terminator.
fn requests_version(arguments: &[OsString]) -> bool {
    arguments
        .iter()
        .take_while(|argument| argument.as_os_str() != "--")
        .any(|argument| argument.as_os_str() == VERSION_FLAG)
}

fn verbosity_from(matches: &ArgMatches) -> usize {
    matches
        .try_get_many::<bool>(VERBOSITY_ID)
        .ok()
        .flatten()
        .map_or(0, Iterator::count)
}

/// An option schema augmented with the standard flags, bound to the streams
/// and context it reports through.
#[derive(Debug)]
pub struct StandardOptions<T> {
    stdout: OutputStream,
    stderr: OutputStream,
    sys_module: ProcessContext,
    schema: PhantomData<fn() -> T>,
}

impl<T: OptionSchema> StandardOptions<T> {
    /// Bind the schema to `sys_module`, using its streams.
    pub fn new(sys_module: ProcessContext) -> Self {
        Self {
            stdout: sys_module.stdout().clone(),
            stderr: sys_module.stderr().clone(),
            sys_module,
            schema: PhantomData,
        }
    }

    /// Use `stdout` instead of the context's output stream.
    #[must_use]
    pub fn with_stdout(mut self, stdout: OutputStream) -> Self {
        self.stdout = stdout;
        self
    }

    /// Use `stderr` instead of the context's error stream.
    #[must_use]
    pub fn with_stderr(mut self, stderr: OutputStream) -> Self {
        self.stderr = stderr;
        self
    }

    /// The output stream.
    pub fn stdout(&self) -> &OutputStream {
        &self.stdout
    }

    /// The error stream.
    pub fn stderr(&self) -> &OutputStream {
        &self.stderr
    }

    /// The system context these options were built for.
    pub fn sys_module(&self) -> &ProcessContext {
        &self.sys_module
    }

    /// The augmented clap command.
    pub fn command(&self) -> Command {
        standard_options(T::command())
    }

    /// The rendered help text, starting with `Usage: <command-name>` and
    /// ending with a newline.
    pub fn help_text(&self) -> String {
        let mut help = self.command().render_help().to_string();
        if !help.ends_with('\n') {
            help.push('\n');
        }
        help
    }

    /// Parse `arguments` (without the program name) into [`Options`].
    ///
    /// `--version` is honoured before any other argument is looked at.
    pub fn parse_options<I, A>(&self, arguments: I) -> Result<Options<T>, ParseInterrupt>
    where
        I: IntoIterator<Item = A>,
        A: Into<OsString>,
    {
        let arguments: Vec<OsString> = arguments.into_iter().map(Into::into).collect();

        if requests_version(&arguments) {
            self.stdout.write_text(&format!("{VERSION}\n"))?;
            return Err(ParseInterrupt::Version);
        }

        let matches = match self.command().try_get_matches_from(arguments) {
            Ok(matches) => matches,
            Err(err) if err.kind() == ErrorKind::DisplayHelp => {
                self.stdout.write_text(&self.help_text())?;
                return Err(ParseInterrupt::Help);
            },
            Err(err) => return Err(UsageError::from(&err).into()),
        };

        let verbosity = verbosity_from(&matches);
        let mut values = T::from_arg_matches(&matches).map_err(UsageError::from)?;
        values.post_options()?;
        debug!(command = T::NAME, verbosity, "parsed options");

        Ok(Options {
            values,
            verbosity,
            stdout: self.stdout.clone(),
            stderr: self.stderr.clone(),
            sys_module: self.sys_module.clone(),
        })
    }
}

/// Parsed command-line options.
///
/// Dereferences to the schema values.
#[derive(Debug)]
pub struct Options<T> {
    values: T,
    verbosity: usize,
    stdout: OutputStream,
    stderr: OutputStream,
    sys_module: ProcessContext,
}

impl<T> Options<T> {
    /// Number of `-v`/`--verbose` flags given.
    pub const fn verbosity(&self) -> usize {
        self.verbosity
    }

    /// The verbosity counter as a level.
    pub const fn verbosity_level(&self) -> Verbosity {
        Verbosity::from_count(self.verbosity)
    }

    /// The parsed schema values.
    pub const fn values(&self) -> &T {
        &self.values
    }

    /// Consume the options, keeping the schema values.
    pub fn into_values(self) -> T {
        self.values
    }

    /// The output stream the options were parsed with.
    pub fn stdout(&self) -> &OutputStream {
        &self.stdout
    }

    /// The error stream the options were parsed with.
    pub fn stderr(&self) -> &OutputStream {
        &self.stderr
    }

    /// The system context the options were parsed with.
    pub fn sys_module(&self) -> &ProcessContext {
        &self.sys_module
    }
}

impl<T> Deref for Options<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.values
    }
}
