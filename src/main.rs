//! course-dl - CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use course_dl::{
    cli::{resolve_credentials, Args, TerminalPrompt},
    config::{validate_config, Config},
    course::load_manifest,
    download::{download_courses, CourseLifecycle, DownloadSettings, YtDlp},
    error::{exit_codes, Error, Result},
    fs::{ensure_dir, prepare_cookie_file, CourseDirs},
    output::{
        create_spinner, print_banner, print_batch_summary, print_config_summary, print_error,
        print_info, print_success, print_warning,
    },
};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(e) => {
            print_error(&format!("{}", e));
            let code = match e {
                _ if e.is_setup_error() => exit_codes::CONFIG_ERROR,
                Error::Canceled => exit_codes::CANCELED,
                Error::CoursesFailed(_) => exit_codes::SOME_COURSES_FAILED,
                Error::Downloader(_) => exit_codes::DOWNLOAD_ERROR,
                _ => exit_codes::UNEXPECTED_ERROR,
            };
            ExitCode::from(code as u8)
        }
    }
}

async fn run() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt().with_env_filter(filter).with_target(false).init();

    // Print banner
    print_banner();

    // Load configuration
    let mut config = if args.config.exists() {
        Config::load(&args.config)?
    } else {
        tracing::debug!(
            "Configuration file not found: {}, using defaults",
            args.config.display()
        );
        Config::default()
    };

    // Merge CLI arguments into config
    args.merge_into_config(&mut config);

    // Validate configuration
    validate_config(&config)?;

    // Load the course list before asking for anything interactively
    let manifest_path = config.manifest_path();
    let courses = load_manifest(&manifest_path)?;
    if courses.is_empty() {
        print_warning(&format!(
            "No courses listed in {}, nothing to do",
            manifest_path.display()
        ));
        return Ok(());
    }

    // Locate the downloader
    let downloader = YtDlp::locate(&config.downloader)?;
    let spinner = create_spinner("Checking downloader...");
    let version = downloader.version().await;
    spinner.finish_and_clear();
    match version {
        Ok(version) => print_info(&format!(
            "Using {} {}",
            downloader.program().display(),
            version
        )),
        Err(e) => print_warning(&format!("Could not determine downloader version: {}", e)),
    }

    // Resolve credentials
    let credential_args = args.credential_args();
    let (credentials, source) = tokio::task::spawn_blocking(move || {
        let mut prompt = TerminalPrompt::new();
        resolve_credentials(&credential_args, &mut prompt)
    })
    .await
    .map_err(|e| Error::Config(format!("Credential prompt failed: {}", e)))??;
    print_info(&format!("Executing by {} ..", source));
    print_info(&format!("Setting username to: {}", credentials.username));

    if !config.download.subtitles {
        print_info("Subtitles will not be appended to videoclips");
    }

    // Set up directories
    let root = config.root_directory();
    let dirs = CourseDirs::new(&root);
    ensure_dir(dirs.base())?;
    let cookie_file = prepare_cookie_file(&root)?;

    print_config_summary(
        &credentials.username,
        courses.len(),
        config.download.subtitles,
        &root.display().to_string(),
    );

    let settings = DownloadSettings::new(&config, credentials, cookie_file);
    let lifecycle = CourseLifecycle {
        downloader: &downloader,
        config: &config,
        settings: &settings,
        dirs: &dirs,
    };

    let summary = download_courses(&lifecycle, &courses).await?;

    // Print batch statistics
    print_batch_summary(&summary);

    if summary.was_canceled() {
        return Err(Error::Canceled);
    }

    if !summary.failed.is_empty() {
        return Err(Error::CoursesFailed(summary.failed.len()));
    }

    print_success("All courses processed");
    Ok(())
}
