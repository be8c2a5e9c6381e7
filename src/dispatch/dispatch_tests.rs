//! Unit tests for dispatch with recording handlers

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::{RunContext, run_command};
use crate::cli::{
    Arguments, BuildArgs, Command, PopulateCacheArgs, Target, WranglerArgs, resolve_args,
};
use crate::commands::{CommandHandlers, CommandInput};
use crate::config::{CONFIG_FILE, OpenNextConfig};
use crate::logger::Logger;
use crate::options::BuildOptions;
use crate::wrangler::WranglerConfig;

#[derive(Debug, PartialEq)]
enum Call {
    Build {
        args: BuildArgs,
        wrangler_name: Option<String>,
    },
    Preview(WranglerArgs),
    Deploy(WranglerArgs),
    Upload(WranglerArgs),
    PopulateCache(PopulateCacheArgs),
}

#[derive(Default)]
struct Recorder {
    calls: RefCell<Vec<Call>>,
    options: RefCell<Option<BuildOptions>>,
    output_dirs: RefCell<Vec<Option<PathBuf>>>,
}

impl Recorder {
    fn record<T>(&self, options: &BuildOptions, input: &CommandInput<'_, T>, call: Call) {
        self.calls.borrow_mut().push(call);
        *self.options.borrow_mut() = Some(options.clone());
        self.output_dirs
            .borrow_mut()
            .push(input.output_dir.map(Path::to_path_buf));
    }
}

impl CommandHandlers for Recorder {
    async fn build(
        &self,
        options: &BuildOptions,
        _config: &OpenNextConfig,
        input: CommandInput<'_, BuildArgs>,
        wrangler: Option<&WranglerConfig>,
    ) -> anyhow::Result<()> {
        let call = Call::Build {
            args: input.args.clone(),
            wrangler_name: wrangler.and_then(|w| w.name.clone()),
        };
        self.record(options, &input, call);
        Ok(())
    }

    async fn preview(
        &self,
        options: &BuildOptions,
        _config: &OpenNextConfig,
        input: CommandInput<'_, WranglerArgs>,
    ) -> anyhow::Result<()> {
        self.record(options, &input, Call::Preview(input.args.clone()));
        Ok(())
    }

    async fn deploy(
        &self,
        options: &BuildOptions,
        _config: &OpenNextConfig,
        input: CommandInput<'_, WranglerArgs>,
    ) -> anyhow::Result<()> {
        self.record(options, &input, Call::Deploy(input.args.clone()));
        Ok(())
    }

    async fn upload(
        &self,
        options: &BuildOptions,
        _config: &OpenNextConfig,
        input: CommandInput<'_, WranglerArgs>,
    ) -> anyhow::Result<()> {
        self.record(options, &input, Call::Upload(input.args.clone()));
        Ok(())
    }

    async fn populate_cache(
        &self,
        options: &BuildOptions,
        _config: &OpenNextConfig,
        input: CommandInput<'_, PopulateCacheArgs>,
    ) -> anyhow::Result<()> {
        self.record(options, &input, Call::PopulateCache(input.args.clone()));
        Ok(())
    }
}

async fn dispatch(
    app_dir: &Path,
    raw: &[&str],
    env: &HashMap<String, String>,
) -> (anyhow::Result<()>, Recorder) {
    let raw_args: Vec<String> = raw.iter().map(|s| s.to_string()).collect();
    let args = resolve_args(&raw_args, app_dir, env).unwrap();
    dispatch_resolved(app_dir, &args, &raw_args, env).await
}

async fn dispatch_resolved(
    app_dir: &Path,
    args: &Arguments,
    raw_args: &[String],
    env: &HashMap<String, String>,
) -> (anyhow::Result<()>, Recorder) {
    let recorder = Recorder::default();
    let logger = Logger::detached();
    let ctx = RunContext {
        app_dir,
        tool_dir: Path::new("/opt/ocf"),
        raw_args,
        env,
        logger: &logger,
    };
    let result = run_command(args, &ctx, &recorder).await;
    (result, recorder)
}

#[tokio::test]
async fn creates_default_config_and_routes_build() {
    let dir = tempfile::tempdir().unwrap();
    let (result, recorder) = dispatch(dir.path(), &["build", "--skipBuild"], &HashMap::new()).await;
    result.unwrap();

    assert!(dir.path().join(CONFIG_FILE).exists());
    assert!(
        dir.path()
            .join(".open-next/.build/open-next.config.edge.json")
            .exists()
    );
    assert_eq!(
        recorder.calls.into_inner(),
        vec![Call::Build {
            args: BuildArgs {
                skip_next_build: true,
                skip_wrangler_config_check: false,
                minify: true,
            },
            wrangler_name: None,
        }]
    );
}

#[tokio::test]
async fn build_reads_wrangler_config_for_env() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("wrangler.json"),
        r#"{"name":"app","env":{"staging":{"name":"app-staging"}}}"#,
    )
    .unwrap();

    let (result, recorder) =
        dispatch(dir.path(), &["build", "--env", "staging"], &HashMap::new()).await;
    result.unwrap();
    let calls = recorder.calls.into_inner();
    assert!(matches!(
        &calls[..],
        [Call::Build { wrangler_name: Some(name), .. }] if name == "app-staging"
    ));
}

#[tokio::test]
async fn build_with_explicit_config_flag() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("custom.toml"), "name = \"custom\"\n").unwrap();

    let (result, recorder) =
        dispatch(dir.path(), &["build", "-c", "custom.toml"], &HashMap::new()).await;
    result.unwrap();
    let calls = recorder.calls.into_inner();
    assert!(matches!(
        &calls[..],
        [Call::Build { wrangler_name: Some(name), .. }] if name == "custom"
    ));
}

#[tokio::test]
async fn routes_wrangler_commands_with_passthrough() {
    let dir = tempfile::tempdir().unwrap();
    let env = HashMap::new();

    let (result, recorder) = dispatch(dir.path(), &["deploy", "--env", "prod"], &env).await;
    result.unwrap();
    assert_eq!(
        recorder.calls.into_inner(),
        vec![Call::Deploy(WranglerArgs {
            passthrough_args: vec!["--env".into(), "prod".into()],
            cache_chunk_size: None,
        })]
    );

    let (result, recorder) = dispatch(dir.path(), &["preview", "--port", "8788"], &env).await;
    result.unwrap();
    assert!(matches!(&recorder.calls.into_inner()[..], [Call::Preview(_)]));

    let (result, recorder) = dispatch(dir.path(), &["upload"], &env).await;
    result.unwrap();
    assert!(matches!(&recorder.calls.into_inner()[..], [Call::Upload(_)]));
}

#[tokio::test]
async fn routes_populate_cache_with_output_dir() {
    let dir = tempfile::tempdir().unwrap();
    let (result, recorder) = dispatch(
        dir.path(),
        &["populateCache", "remote", "--env=staging", "-o", "dist"],
        &HashMap::new(),
    )
    .await;
    result.unwrap();

    assert_eq!(
        recorder.calls.into_inner(),
        vec![Call::PopulateCache(PopulateCacheArgs {
            target: Target::Remote,
            environment: Some("staging".into()),
            cache_chunk_size: None,
        })]
    );
    assert_eq!(
        recorder.output_dirs.into_inner(),
        vec![Some(dir.path().join("dist"))]
    );
}

#[tokio::test]
async fn debug_comes_from_environment() {
    let dir = tempfile::tempdir().unwrap();
    let env: HashMap<String, String> =
        [("NEXT_PRIVATE_DEBUG".to_string(), "true".to_string())].into();
    let (result, recorder) = dispatch(dir.path(), &["upload"], &env).await;
    result.unwrap();

    let options = recorder.options.into_inner().unwrap();
    assert!(options.debug);
    assert_eq!(options.app_path, dir.path());
    assert_eq!(options.tool_dir, PathBuf::from("/opt/ocf"));
}

#[tokio::test]
async fn incompatible_config_stops_before_handler() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(CONFIG_FILE),
        r#"{"default":{"override":{"wrapper":"aws-lambda"}}}"#,
    )
    .unwrap();

    let (result, recorder) = dispatch(dir.path(), &["deploy"], &HashMap::new()).await;
    let err = result.unwrap_err();
    assert!(err.to_string().contains("not compatible with Cloudflare"));
    assert!(recorder.calls.into_inner().is_empty());
}

#[tokio::test]
async fn unknown_wrangler_environment_fails_build() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("wrangler.json"), r#"{"name":"app"}"#).unwrap();

    let (result, recorder) =
        dispatch(dir.path(), &["build", "--env=nope"], &HashMap::new()).await;
    assert!(result.is_err());
    assert!(recorder.calls.into_inner().is_empty());
}

#[tokio::test]
async fn existing_config_is_kept() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = OpenNextConfig::cloudflare_default();
    config.debug = true;
    std::fs::write(
        dir.path().join(CONFIG_FILE),
        serde_json::to_string(&config).unwrap(),
    )
    .unwrap();

    let args = Arguments {
        command: Command::Preview(WranglerArgs {
            passthrough_args: vec![],
            cache_chunk_size: Some(5),
        }),
        output_dir: None,
    };
    let (result, recorder) = dispatch_resolved(dir.path(), &args, &[], &HashMap::new()).await;
    result.unwrap();
    assert!(recorder.options.into_inner().unwrap().debug);
}
