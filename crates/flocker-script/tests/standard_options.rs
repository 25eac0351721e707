#![allow(missing_docs, clippy::expect_used, clippy::unwrap_used)]

//! Behavior every augmented command shares, checked against several schemas.

use std::path::PathBuf;

use clap::Args;
use flocker_script::{
    OptionSchema, OutputStream, ParseInterrupt, ProcessContext, StandardOptions, SystemExit,
    VERSION,
};

#[derive(Args, Debug)]
struct BareOptions {}

impl OptionSchema for BareOptions {
    const NAME: &'static str = "bare";
}

#[derive(Args, Debug)]
struct PoolOptions {
    /// Storage pool to use
    #[arg(long, default_value = "/flocker")]
    pool: PathBuf,

    /// Dry run
    #[arg(short = 'n', long)]
    dry_run: bool,
}

impl OptionSchema for PoolOptions {
    const NAME: &'static str = "pool";
}

macro_rules! standard_options_tests {
    ($module:ident, $schema:ty) => {
        mod $module {
            use super::*;

            fn options(context: &ProcessContext) -> StandardOptions<$schema> {
                StandardOptions::new(context.clone())
            }

            #[test]
            fn sys_module_is_kept() {
                let context = ProcessContext::captured(["cmd"]);
                assert!(options(&context).sys_module().ptr_eq(&context));
            }

            #[test]
            fn streams_default_to_context() {
                let context = ProcessContext::captured(["cmd"]);
                let options = options(&context);
                assert!(options.stdout().ptr_eq(context.stdout()));
                assert!(options.stderr().ptr_eq(context.stderr()));
            }

            #[test]
            fn streams_override() {
                let context = ProcessContext::captured(["cmd"]);
                let stdout = OutputStream::memory();
                let stderr = OutputStream::memory();
                let options = options(&context)
                    .with_stdout(stdout.clone())
                    .with_stderr(stderr.clone());
                assert!(options.stdout().ptr_eq(&stdout));
                assert!(options.stderr().ptr_eq(&stderr));
            }

            #[test]
            fn version() {
                let context = ProcessContext::captured(["cmd"]);
                let interrupt = options(&context)
                    .parse_options(["--version"])
                    .unwrap_err();
                assert_eq!(
                    (context.stdout().contents_lossy(), interrupt.into_exit().unwrap()),
                    (format!("{VERSION}\n"), SystemExit::success())
                );
            }

            #[test]
            fn version_anywhere() {
                let context = ProcessContext::captured(["cmd"]);
                let result = options(&context).parse_options(["-v", "--nope", "--version"]);
                assert!(matches!(result, Err(ParseInterrupt::Version)));
                assert_eq!(context.stdout().contents_lossy(), format!("{VERSION}\n"));
            }

            #[test]
            fn verbosity_default() {
                let context = ProcessContext::captured(["cmd"]);
                let parsed = options(&context)
                    .parse_options(Vec::<String>::new())
                    .unwrap();
                assert_eq!(parsed.verbosity(), 0);
            }

            #[test]
            fn verbosity_counts_every_flag() {
                for count in 1..=6 {
                    let context = ProcessContext::captured(["cmd"]);
                    let flags: Vec<&str> = (0..count)
                        .map(|i| if i % 2 == 0 { "-v" } else { "--verbose" })
                        .collect();
                    let parsed = options(&context).parse_options(flags).unwrap();
                    assert_eq!(parsed.verbosity(), count);
                }
            }

            #[test]
            fn unexpected_argument_is_usage_error() {
                let context = ProcessContext::captured(["cmd"]);
                let result = options(&context).parse_options(["--unexpected-argument"]);
                assert!(matches!(result, Err(ParseInterrupt::Usage(_))));
            }
        }
    };
}

standard_options_tests!(bare, BareOptions);
standard_options_tests!(pool, PoolOptions);

#[test]
fn augmentation_keeps_schema_flags() {
    let context = ProcessContext::captured(["pool"]);
    let parsed = StandardOptions::<PoolOptions>::new(context)
        .parse_options(["-n", "-v", "--pool", "/tank"])
        .unwrap();
    assert!(parsed.dry_run);
    assert_eq!(parsed.pool, PathBuf::from("/tank"));
    assert_eq!(parsed.verbosity(), 1);
}
