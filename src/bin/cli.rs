//! Birjuram CLI
//!
//! Command-line client for the Birjuram career-guidance service:
//! - Register, log in and out
//! - Show or generate a learning roadmap
//! - Show or generate a counselling report
//! - Take the weekly quiz

use anyhow::{anyhow, bail, Context};
use birjuram::api::{CareerClient, ReqwestTransport};
use birjuram::config::{generate_default_config, Config, LoggingConfig};
use birjuram::models::{option_index, option_letter, CounsellingReport, Roadmap};
use birjuram::session::{FileStorage, SessionStore};
use birjuram::views::{
    AuthModal, AuthOutcome, CounsellorPage, HistoryEntry, HistoryModal, HomeView, NavState,
    PresenceOutcome, QuizPage, RoadmapPage, WeekEntry, EMPTY_HISTORY,
};
use birjuram::Settled;
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

type Client = CareerClient<ReqwestTransport>;
type Store = SessionStore<FileStorage>;

#[derive(Parser)]
#[command(name = "birjuram")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "AI career guidance from the terminal")]
#[command(long_about = "Birjuram generates personalized learning roadmaps, weekly quizzes and\ncareer counselling reports. Log in first; the session is kept on disk.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Service URL (overrides the config file)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file (default: platform config dir, then ./birjuram.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text", global = true)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an account
    ///
    /// The password is read from BIRJURAM_PASSWORD, else prompted for.
    Register { username: String, email: String },

    /// Log in and save the session
    ///
    /// The password is read from BIRJURAM_PASSWORD, else prompted for.
    Login { username: String },

    /// Forget the saved session
    Logout,

    /// Show who is logged in
    Whoami,

    /// Learning roadmap
    Roadmap {
        #[command(subcommand)]
        action: RoadmapAction,
    },

    /// Career counselling report
    Counsel {
        #[command(subcommand)]
        action: CounselAction,
    },

    /// Weekly quiz
    Quiz {
        #[command(subcommand)]
        action: QuizAction,
    },

    /// List previous roadmaps or counselling reports
    History {
        #[arg(value_enum)]
        kind: HistoryArg,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum RoadmapAction {
    /// Show the saved roadmap
    Show,
    /// Generate a new roadmap
    Generate {
        /// Target role, e.g. "Frontend Developer"
        #[arg(long)]
        role: String,
        /// beginner, intermediate or advanced
        #[arg(long, default_value = "beginner")]
        level: String,
        /// Current skills, e.g. "HTML, CSS"
        #[arg(long)]
        skill: String,
        /// Length in weeks
        #[arg(long)]
        duration: u32,
    },
}

#[derive(Subcommand)]
pub enum CounselAction {
    /// Show the saved report
    Show,
    /// Request a new report
    Generate {
        #[arg(long)]
        education: String,
        #[arg(long)]
        field: String,
        #[arg(long)]
        skills: String,
        /// What you want out of your career
        #[arg(long)]
        intent: String,
    },
}

#[derive(Subcommand)]
pub enum QuizAction {
    /// Show this week's quiz, generating it if needed
    Show,
    /// Submit answers for this week's quiz
    Submit {
        /// Answer as <question number>=<letter>, e.g. 1=B (repeatable)
        #[arg(short, long = "answer", required = true)]
        answers: Vec<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum HistoryArg {
    Roadmap,
    Counselling,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }

    init_logging(&config.logging);

    let store = SessionStore::new(FileStorage::new(&config.session.dir));
    let client = CareerClient::new(ReqwestTransport::new(), &config.api.base_url)
        .with_token(store.token());
    let json = cli.format == OutputFormat::Json;

    match cli.command {
        Commands::Register { username, email } => {
            let mut modal = AuthModal::new();
            modal.open_register();
            modal.username = username;
            modal.email = email;
            modal.password = prompt_password()?;
            authenticate(&mut modal, &client, &store).await?;
            if let Some(notice) = modal.notice() {
                println!("{}", notice);
            }
        }

        Commands::Login { username } => {
            let mut modal = AuthModal::new();
            modal.open_login();
            modal.username = username;
            modal.password = prompt_password()?;
            if let AuthOutcome::LoggedIn(session) =
                authenticate(&mut modal, &client, &store).await?
            {
                println!("Logged in as {}", session.user.display_name());
            }
        }

        Commands::Logout => {
            store.clear()?;
            println!("Logged out");
        }

        Commands::Whoami => {
            let mut home = HomeView::new(store.get());
            if let Some(PresenceOutcome::SessionExpired) = home.refresh(&client).await {
                store.clear()?;
                println!("Session expired. Log in again.");
                return Ok(());
            }
            match home.nav() {
                NavState::SignedIn {
                    display_name,
                    email,
                    ..
                } => {
                    println!("{}", display_name);
                    if !email.is_empty() {
                        println!("{}", email);
                    }
                }
                NavState::Guest => println!("Not logged in"),
            }
        }

        Commands::Roadmap { action } => {
            require_login(&store)?;
            let mut page = RoadmapPage::new();
            settle(page.load(&client).await)?;

            if let RoadmapAction::Generate {
                role,
                level,
                skill,
                duration,
            } = action
            {
                page.form.role = role;
                page.form.level = level;
                page.form.skill = skill;
                page.form.duration = duration.to_string();
                eprintln!("Generating your roadmap...");
                settle(page.generate(&client).await?)?;
            }

            match page.roadmap() {
                Some(roadmap) if json => println!("{}", serde_json::to_string_pretty(roadmap)?),
                Some(roadmap) => print_roadmap(roadmap),
                None => {
                    println!("No roadmap yet.");
                    println!();
                    println!("Generate one with:");
                    println!("  birjuram roadmap generate --role \"Frontend Developer\" --skill HTML --duration 12");
                }
            }
        }

        Commands::Counsel { action } => {
            require_login(&store)?;
            let mut page = CounsellorPage::new();
            settle(page.load(&client).await)?;

            if let CounselAction::Generate {
                education,
                field,
                skills,
                intent,
            } = action
            {
                page.form.education = education;
                page.form.field = field;
                page.form.skills = skills;
                page.form.intent = intent;
                eprintln!("Generating your counselling report...");
                settle(page.counsel(&client).await?)?;
            }

            match page.report() {
                Some(report) if json => println!("{}", serde_json::to_string_pretty(report)?),
                Some(report) => print_report(report),
                None => println!("No counselling report yet. Run `birjuram counsel generate`."),
            }
        }

        Commands::Quiz { action } => {
            require_login(&store)?;
            let today = chrono::Local::now().date_naive();
            let mut page = QuizPage::new(config.quiz.start_date, today);

            // Week numbering follows the roadmap when it has a start date
            if let Ok(Some(roadmap)) = client.fetch_roadmap().await {
                page.anchor(roadmap.start_date, today);
            }
            tracing::debug!(start = %page.start(), week = page.week(), "Quiz week");
            settle(page.load(&client).await)?;

            if let QuizAction::Submit { answers } = action {
                for answer in &answers {
                    let (question, option) = parse_answer(answer)?;
                    page.select(question, option)?;
                }
                settle(page.submit(&client).await?)?;
            }

            match page.current() {
                Some(entry) if json => println!("{}", serde_json::to_string_pretty(&entry.quiz)?),
                Some(entry) => print_quiz(&page.title(), entry),
                None => bail!("No quiz available for week {}", page.week()),
            }
        }

        Commands::History { kind } => {
            require_login(&store)?;
            let mut modal = HistoryModal::default();
            match kind {
                HistoryArg::Roadmap => {
                    let roadmap = client.fetch_roadmap().await?;
                    modal.open_roadmaps(roadmap.as_ref().map(HistoryEntry::from_roadmap));
                }
                HistoryArg::Counselling => {
                    let report = client.fetch_counselling().await?;
                    modal.open_counsellings(report.as_ref().map(HistoryEntry::from_report));
                }
            }

            println!("{}", modal.title());
            println!("{}", "-".repeat(40));
            if modal.is_empty() {
                println!("{}", EMPTY_HISTORY);
            }
            for entry in &modal.entries {
                match &entry.date {
                    Some(date) => println!("{:<28} {}", entry.title, date),
                    None => println!("{}", entry.title),
                }
            }
        }

        Commands::Config { output } => {
            let config = generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

fn init_logging(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(logging.filter()));
    let registry = tracing_subscriber::registry().with(filter);

    if logging.is_json() {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

async fn authenticate(
    modal: &mut AuthModal,
    client: &Client,
    store: &Store,
) -> anyhow::Result<AuthOutcome> {
    match modal.submit(client, store).await {
        Some(AuthOutcome::Failed(message)) => Err(anyhow!(message)),
        Some(outcome) => Ok(outcome),
        None => Err(anyhow!(modal
            .error()
            .unwrap_or("Could not submit")
            .to_string())),
    }
}

fn require_login(store: &Store) -> anyhow::Result<()> {
    if store.token().is_none() {
        bail!("Not logged in. Run `birjuram login <username>` first.");
    }
    Ok(())
}

fn settle(settled: Settled) -> anyhow::Result<()> {
    match settled {
        Settled::Failed(message) => Err(anyhow!(message)),
        _ => Ok(()),
    }
}

/// `"2=b"` -> question index 1, option index 1
/// Environment variable holding the password for scripted use
const PASSWORD_ENV: &str = "BIRJURAM_PASSWORD";

fn prompt_password() -> anyhow::Result<String> {
    let from_env = std::env::var(PASSWORD_ENV).ok();
    if from_env.is_none() {
        eprint!("Password: ");
        std::io::stderr().flush()?;
    }
    read_password(from_env, std::io::stdin().lock())
}

/// Password from the environment value if set, else one line of `input`
fn read_password(from_env: Option<String>, mut input: impl BufRead) -> anyhow::Result<String> {
    let password = match from_env {
        Some(password) => password,
        None => {
            let mut line = String::new();
            input.read_line(&mut line).context("Failed to read password")?;
            line.trim_end_matches(['\r', '\n']).to_string()
        }
    };
    if password.is_empty() {
        bail!("Password is required");
    }
    Ok(password)
}

fn parse_answer(answer: &str) -> anyhow::Result<(usize, usize)> {
    let (number, letter) = answer
        .split_once('=')
        .with_context(|| format!("Invalid answer {:?}, expected <question number>=<letter>", answer))?;
    let number: usize = number
        .trim()
        .parse()
        .with_context(|| format!("Invalid question number in {:?}", answer))?;
    if number == 0 {
        bail!("Question numbers start at 1");
    }
    let option = option_index(letter.trim())
        .with_context(|| format!("Invalid option letter in {:?}", answer))?;
    Ok((number - 1, option))
}

fn print_roadmap(roadmap: &Roadmap) {
    println!("{} Roadmap", roadmap.role);
    println!();
    println!("{}", roadmap.introduction());

    for (i, stage) in roadmap.stages.iter().enumerate() {
        println!();
        println!("Stage {}: {}", i + 1, stage.stage);
        if !stage.skills.is_empty() {
            println!("  Skills: {}", stage.skills.join(", "));
        }
        for action in &stage.actions {
            println!("  - {}", action);
        }
    }

    if !roadmap.weekly_plan.is_empty() {
        println!();
        println!("Weekly Plan");
        println!("{}", "-".repeat(40));
        for week in &roadmap.weekly_plan {
            println!("Week {:<4} {}", week.week, week.focus.join(", "));
        }
    }
}

fn print_report(report: &CounsellingReport) {
    println!("{}", report.title());
    if !report.report_header.introduction.is_empty() {
        println!();
        println!("{}", report.report_header.introduction);
    }

    println!();
    println!("Profile Analysis");
    for (label, value) in report.profile_rows() {
        if !value.is_empty() {
            println!("  {:<18} {}", format!("{}:", label), value);
        }
    }

    let guidance = &report.strategic_guidance;
    println!();
    println!("Strategic Guidance");
    for text in [
        &guidance.situational_overview,
        &guidance.clarity_strategy,
        &guidance.overarching_recommendation,
    ] {
        if !text.is_empty() {
            println!("  {}", text);
        }
    }

    for pathway in &report.detailed_career_pathways {
        println!();
        println!("Career Pathway: {}", pathway.role);
        if !pathway.role_overview.description.is_empty() {
            println!("  {}", pathway.role_overview.description);
        }
        if !pathway.role_overview.day_in_the_life.is_empty() {
            println!("  Day in the life: {}", pathway.role_overview.day_in_the_life);
        }
        for responsibility in &pathway.role_overview.key_responsibilities {
            println!("  - {}", responsibility);
        }
        if !pathway.reality_check.is_empty() {
            println!("  Reality check: {}", pathway.reality_check);
        }
        if !pathway.recommended_learning_resources.is_empty() {
            println!("  Resources: {}", pathway.recommended_learning_resources.join(", "));
        }
        if !pathway.networking_and_branding_tip.is_empty() {
            println!("  Networking tip: {}", pathway.networking_and_branding_tip);
        }
    }

    let summary = &report.concluding_summary;
    if !summary.immediate_actions.is_empty() || !summary.final_encouragement.is_empty() {
        println!();
        println!("Next Steps");
        for action in &summary.immediate_actions {
            println!("  - {}", action);
        }
        if !summary.final_encouragement.is_empty() {
            println!();
            println!("{}", summary.final_encouragement);
        }
    }
}

fn print_quiz(title: &str, entry: &WeekEntry) {
    println!("{}", title);

    let quiz = &entry.quiz;
    for (i, question) in quiz.questions.iter().enumerate() {
        println!();
        println!("{}. {}", i + 1, question.question);
        let selected = entry.attempt.selected(i);
        for (j, option) in question.options.iter().enumerate() {
            let Some(letter) = option_letter(j) else { break };
            let marker = if selected == Some(j) { "*" } else { " " };
            println!("  {} {}) {}", marker, letter, option);
        }
        if let Some(correct) = question.correct_letter().filter(|_| quiz.is_submitted()) {
            let text = question.option(&correct.to_string()).unwrap_or_default();
            println!("  Correct answer: {}) {}", correct, text);
        }
    }

    println!();
    match quiz.score {
        Some(score) => println!("Score: {}/{}", score, quiz.total()),
        None => println!(
            "Answer every question, then run `birjuram quiz submit -a 1=A -a 2=C ...` ({}/{} answered)",
            entry.attempt.answered(),
            quiz.total()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_password_is_not_a_flag() {
        let cli = Cli::try_parse_from(["birjuram", "login", "asha"]).unwrap();
        assert!(matches!(cli.command, Commands::Login { ref username } if username == "asha"));
        assert!(Cli::try_parse_from(["birjuram", "login", "asha", "--password", "pw"]).is_err());
    }

    #[test]
    fn test_read_password() {
        let env = read_password(Some("from-env".into()), Cursor::new("typed\n")).unwrap();
        assert_eq!(env, "from-env");

        let typed = read_password(None, Cursor::new("s3cret\r\n")).unwrap();
        assert_eq!(typed, "s3cret");

        assert!(read_password(None, Cursor::new("\n")).is_err());
        assert!(read_password(Some(String::new()), Cursor::new("")).is_err());
    }

    #[test]
    fn test_parse_answer_is_one_based() {
        assert_eq!(parse_answer("2=c").unwrap(), (1, 2));
        assert!(parse_answer("0=A").is_err());
        assert!(parse_answer("2").is_err());
    }
}
