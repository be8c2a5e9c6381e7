use super::{ConfigError, OpenNextConfig, Override};

/// Reject configurations that cannot run on Cloudflare Workers.
///
/// All problems are reported together.
pub fn ensure_cloudflare_config(config: &OpenNextConfig) -> Result<(), ConfigError> {
    let mut problems = Vec::new();

    check_override(
        "default",
        &config.default.override_,
        "cloudflare-node",
        &mut problems,
    );

    if !config.edge_externals.iter().any(|e| e == "node:crypto") {
        problems.push("`edgeExternals` must include \"node:crypto\"".to_string());
    }

    match &config.middleware {
        Some(mw) => {
            if !mw.external {
                problems.push("`middleware.external` must be true".to_string());
            }
            check_override("middleware", &mw.override_, "cloudflare-edge", &mut problems);
        }
        None => problems.push("`middleware` must be configured as external".to_string()),
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::Incompatible { problems })
    }
}

fn check_override(scope: &str, o: &Override, wrapper: &str, problems: &mut Vec<String>) {
    let mut expect = |field: &str, actual: &Option<String>, value: &str| {
        if actual.as_deref() != Some(value) {
            problems.push(format!("`{scope}.override.{field}` must be \"{value}\""));
        }
    };
    expect("wrapper", &o.wrapper, wrapper);
    expect("converter", &o.converter, "edge");
    expect("proxyExternalRequest", &o.proxy_external_request, "fetch");

    for (field, value) in [
        ("incrementalCache", &o.incremental_cache),
        ("tagCache", &o.tag_cache),
        ("queue", &o.queue),
    ] {
        if value.is_none() {
            problems.push(format!("`{scope}.override.{field}` must be set"));
        }
    }
}
