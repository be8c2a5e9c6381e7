//! Scanners for the wrangler flags `ocf` needs to know about but never consumes.
//!
//! These read the raw argument vector directly so that the same flags still
//! reach wrangler through the passthrough arguments.

/// Value of `--env <name>`, `--env=<name>`, `-e <name>` or `-e=<name>`.
pub fn environment_flag<S: AsRef<str>>(args: &[S]) -> Option<String> {
    flag_value(args, "--env", "-e")
}

/// Value of `--config <path>`, `--config=<path>`, `-c <path>` or `-c=<path>`.
pub fn config_flag<S: AsRef<str>>(args: &[S]) -> Option<String> {
    flag_value(args, "--config", "-c")
}

fn flag_value<S: AsRef<str>>(args: &[S], long: &str, short: &str) -> Option<String> {
    for (i, arg) in args.iter().enumerate() {
        let arg = arg.as_ref();
        if arg == "--" {
            break;
        }

        if arg == long || arg == short {
            return args
                .get(i + 1)
                .map(|v| v.as_ref())
                .filter(|v| !v.starts_with('-'))
                .map(str::to_string);
        }

        for flag in [long, short] {
            if let Some(value) = arg
                .strip_prefix(flag)
                .and_then(|rest| rest.strip_prefix('='))
            {
                return Some(value.to_string());
            }
        }
    }
    None
}
