use std::sync::LazyLock;

use regex::Regex;

use super::schema::OptionSchema;

/// `--arg`, `-arg`, optionally followed by `=value`. Names are ASCII word characters.
static FLAG_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^--?([A-Za-z0-9_][A-Za-z0-9_-]*)(=.+)?$").expect("valid flag regex")
});

/// Collect the arguments that `ocf` does not understand, to be forwarded to wrangler.
///
/// Unknown flags keep the values that follow them (`--tag a b` stays three
/// tokens), and everything after a literal `--` is forwarded as-is. Plain
/// positionals and options known to `schema` are dropped.
pub fn passthrough_args<S: AsRef<str>>(args: &[S], schema: &OptionSchema) -> Vec<String> {
    let mut out = Vec::new();

    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_ref();

        if arg == "--" {
            out.extend(args[i + 1..].iter().map(|a| a.as_ref().to_string()));
            return out;
        }

        if let Some(name) = FLAG_SHAPE
            .captures(arg)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
            && !schema.recognizes(name)
        {
            out.push(arg.to_string());

            // greedy arrays: `--tag a b c`
            while let Some(next) = args.get(i + 1).map(AsRef::as_ref)
                && !next.starts_with('-')
            {
                out.push(next.to_string());
                i += 1;
            }
        }

        i += 1;
    }

    out
}
