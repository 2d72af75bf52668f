#![warn(missing_docs)]
//! # content-studio binary
//!
//! Terminal front end for content-studio.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::thread;
use std::time::Instant;

use clap::{Args, Parser, Subcommand, ValueEnum};
use content_studio_api::{GeneratedImage, IMAGE_DATA_URI_PREFIX};
use content_studio_app::clipboard::SystemClipboard;
use content_studio_app::config::AppConfig;
use content_studio_app::{AppError, ContentStudio, app_version, redact_sensitive, telemetry};
use content_studio_auth::AuthMode;
use content_studio_core::{Level, Palette, RequestField};
use content_studio_ui::{
    AuthOutcome, AuthScreen, DashboardScreen, ImageGeneratorScreen, ImageSlot, ResultField,
    ResultScreen, RevealStep, Route, UiError,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Generate social media content from the terminal.
#[derive(Parser, Debug)]
#[command(name = "content-studio", version = app_version())]
struct Cli {
    /// Config file (defaults to the platform config dir)
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Backend base URL, overriding config and environment
    #[arg(long, value_name = "URL", global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and store the session
    Login {
        /// Account email
        #[arg(long)]
        email: String,
        /// Account password
        #[arg(long, env = "CONTENT_STUDIO_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account
    Register {
        /// Display name
        #[arg(long)]
        username: String,
        /// Account email
        #[arg(long)]
        email: String,
        /// Account password
        #[arg(long, env = "CONTENT_STUDIO_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Remove the stored session
    Logout,
    /// Show session state and probe the backend
    Status,
    /// Generate a post script and visual prompt
    Generate(GenerateArgs),
    /// Generate an image from a prompt
    Image {
        /// Image description
        #[arg(long)]
        prompt: String,
        /// Write the decoded JPEG here instead of printing the data URI
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Print a random five-color palette
    Palette,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// 1 = Quick Post, 2 = Studio Mode, 3 = Director's Cut
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=3))]
    level: u8,
    /// Brand name
    #[arg(long)]
    brand_name: String,
    /// Topic
    #[arg(long)]
    topic: String,
    /// Objective
    #[arg(long)]
    objective: Option<String>,
    /// Platform
    #[arg(long)]
    platform: Option<String>,
    /// Target audience
    #[arg(long)]
    target_audience: Option<String>,
    /// Tone
    #[arg(long)]
    tone: Option<String>,
    /// Art style
    #[arg(long)]
    art_style: Option<String>,
    /// Regional or cultural context notes
    #[arg(long)]
    indian_context: Option<String>,
    /// Text structure
    #[arg(long)]
    text_structure: Option<String>,
    /// Color palette (replaces the generated one)
    #[arg(long)]
    color_palette: Option<String>,
    /// Copy one text block to the clipboard
    #[arg(long, value_enum)]
    copy: Option<CopyTarget>,
    /// Print text at once instead of word by word
    #[arg(long)]
    no_reveal: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CopyTarget {
    Script,
    Prompt,
}

impl From<CopyTarget> for ResultField {
    fn from(target: CopyTarget) -> Self {
        match target {
            CopyTarget::Script => ResultField::Script,
            CopyTarget::Prompt => ResultField::VisualPrompt,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(error) = telemetry::init() {
        eprintln!("warning: file logging disabled: {error}");
    }

    match run(cli) {
        Ok(code) => code,
        Err(error) => {
            let message = redact_sensitive(&error.to_string());
            tracing::error!(%message, "command failed");
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, AppError> {
    let Cli {
        config,
        api_url,
        command,
    } = cli;
    let open = || open_studio(config.as_deref(), api_url.as_deref());

    match command {
        Command::Login { email, password } => {
            let mut screen = AuthScreen::new(AuthMode::Login);
            screen.form.email = email;
            screen.form.password = password;
            authenticate(&mut open()?, screen)
        }
        Command::Register {
            username,
            email,
            password,
        } => {
            let mut screen = AuthScreen::new(AuthMode::Register);
            screen.form.username = username;
            screen.form.email = email;
            screen.form.password = password;
            authenticate(&mut open()?, screen)
        }
        Command::Logout => {
            open()?.logout()?;
            println!("Signed out.");
            Ok(ExitCode::SUCCESS)
        }
        Command::Status => status(&open()?),
        Command::Generate(args) => generate(&mut open()?, args),
        Command::Image { prompt, out } => image(&mut open()?, prompt, out),
        Command::Palette => {
            let palette = Palette::generate(&mut StdRng::from_os_rng());
            println!("{palette}");
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn open_studio(config: Option<&Path>, api_url: Option<&str>) -> Result<ContentStudio, AppError> {
    let mut config = AppConfig::resolve(config)?;
    if let Some(url) = api_url {
        config.api_base_url = url.to_string();
        config.validate()?;
    }
    ContentStudio::from_config(&config)
}

fn authenticate(studio: &mut ContentStudio, mut screen: AuthScreen) -> Result<ExitCode, AppError> {
    println!("{}", screen.mode().greeting());
    match studio.submit_auth(&mut screen)? {
        AuthOutcome::LoggedIn => {
            let username = studio.session().username().unwrap_or_default();
            println!("Signed in as {username}.");
            Ok(ExitCode::SUCCESS)
        }
        AuthOutcome::Registered => {
            println!("{}", screen.notice().unwrap_or_default());
            Ok(ExitCode::SUCCESS)
        }
        AuthOutcome::Failed => {
            eprintln!("{}", screen.error().unwrap_or_default());
            Ok(ExitCode::FAILURE)
        }
    }
}

fn status(studio: &ContentStudio) -> Result<ExitCode, AppError> {
    let snapshot = studio.status();
    println!("content-studio {}", snapshot.version);
    println!("api: {}", snapshot.api_base_url);
    match snapshot.username.filter(|_| snapshot.signed_in) {
        Some(username) => println!("session: signed in as {username}"),
        None => println!("session: signed out"),
    }

    match studio.health() {
        Ok(health) => {
            println!("backend: {}", health.message);
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            println!("backend: unreachable ({error})");
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Returns `false` after printing a hint when the guard redirected to login.
fn enter(studio: &mut ContentStudio, route: Route) -> bool {
    if studio.navigate(route.path()).resolved == Route::Login {
        eprintln!("Not signed in. Run `content-studio login` first.");
        return false;
    }
    true
}

fn generate(studio: &mut ContentStudio, args: GenerateArgs) -> Result<ExitCode, AppError> {
    if !enter(studio, Route::Dashboard) {
        return Ok(ExitCode::FAILURE);
    }

    let mut screen = dashboard_screen(&args)?;

    println!("Generating ({})...", screen.level().label());
    if !studio.generate(&mut screen)? {
        eprintln!("{}", screen.alert().unwrap_or_default());
        return Ok(ExitCode::FAILURE);
    }

    let Some(mut result) = studio.result_screen() else {
        return Ok(ExitCode::FAILURE);
    };

    if let Err(error) = print_result(&mut io::stdout().lock(), &result, args.no_reveal) {
        if error.kind() == io::ErrorKind::BrokenPipe {
            return Ok(ExitCode::SUCCESS);
        }
        return Err(AppError::Output(format!("stdout: {error}")));
    }

    if let Some(target) = args.copy {
        let field = ResultField::from(target);
        let mut clipboard = SystemClipboard::new()?;
        let now = Instant::now();
        result.copy(field, &mut clipboard, now);
        println!("{}", result.copy_label(field, now));
    }

    Ok(ExitCode::SUCCESS)
}

/// Fills a fresh dashboard form from the `generate` flags.
fn dashboard_screen(args: &GenerateArgs) -> Result<DashboardScreen, AppError> {
    let mut screen = DashboardScreen::with_os_rng();
    screen.set_level(Level::from_number(args.level).map_err(UiError::from)?);

    let inputs = [
        (RequestField::BrandName, Some(&args.brand_name)),
        (RequestField::Topic, Some(&args.topic)),
        (RequestField::Objective, args.objective.as_ref()),
        (RequestField::Platform, args.platform.as_ref()),
        (RequestField::TargetAudience, args.target_audience.as_ref()),
        (RequestField::Tone, args.tone.as_ref()),
        (RequestField::ArtStyle, args.art_style.as_ref()),
        (RequestField::IndianContext, args.indian_context.as_ref()),
        (RequestField::TextStructure, args.text_structure.as_ref()),
        (RequestField::ColorPalette, args.color_palette.as_ref()),
    ];
    for (field, value) in inputs {
        let Some(value) = value else { continue };
        if field.options().is_some() {
            screen.select_option(field, value)?;
        } else {
            screen.set_field(field, value.as_str());
        }
    }
    Ok(screen)
}

fn print_result<W: Write>(out: &mut W, result: &ResultScreen, instant: bool) -> io::Result<()> {
    writeln!(out, "\n== Script ==")?;
    print_text(out, &result.reveal(ResultField::Script), instant)?;
    writeln!(out, "\n== Visual Prompt ==")?;
    print_text(out, &result.reveal(ResultField::VisualPrompt), instant)?;
    match result.image() {
        ImageSlot::Url(url) => writeln!(out, "\nImage: {url}"),
        ImageSlot::Placeholder => writeln!(out, "\nImage: (not generated)"),
    }
}

/// Writes `steps` word by word, stopping at the first write error.
fn print_text<W: Write>(out: &mut W, steps: &[RevealStep<'_>], instant: bool) -> io::Result<()> {
    let start = Instant::now();
    for (index, step) in steps.iter().enumerate() {
        if !instant && let Some(wait) = step.delay.checked_sub(start.elapsed()) {
            thread::sleep(wait);
        }
        let separator = if index == 0 { "" } else { " " };
        write!(out, "{separator}{}", step.word)?;
        out.flush()?;
    }
    writeln!(out)
}

fn image(
    studio: &mut ContentStudio,
    prompt: String,
    out: Option<PathBuf>,
) -> Result<ExitCode, AppError> {
    if !enter(studio, Route::ImageGenerator) {
        return Ok(ExitCode::FAILURE);
    }

    let mut screen = ImageGeneratorScreen::new();
    screen.prompt = prompt;
    studio.generate_image(&mut screen)?;

    if let Some(error) = screen.error() {
        eprintln!("{error}");
        return Ok(ExitCode::FAILURE);
    }
    let Some(view) = screen.image() else {
        return Ok(ExitCode::FAILURE);
    };

    match out {
        Some(path) => {
            let payload = view
                .src
                .strip_prefix(IMAGE_DATA_URI_PREFIX)
                .unwrap_or(&view.src);
            let bytes = GeneratedImage::new(payload).decode()?;
            fs::write(&path, &bytes)
                .map_err(|error| AppError::Output(format!("{}: {error}", path.display())))?;
            println!("Wrote {} bytes to {}", bytes.len(), path.display());
        }
        None => println!("{}", view.src),
    }
    Ok(ExitCode::SUCCESS)
}
