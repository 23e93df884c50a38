//! Roster Quiz - terminal demo for the quiz engine.

use std::error::Error;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use roster_quiz::config::{ConfigLoader, QuizConfig};
use roster_quiz::engine::QuizEngine;
use roster_quiz::roster::{Member, MemberId};
use roster_quiz::schema::{AttrValue, AttributeId, Schema};
use roster_quiz::score::{Outcome, UserId};

#[derive(Parser)]
#[command(name = "roster-quiz", about = "Quiz engine for learning a roster", version)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// State file to load and save.
    #[arg(long, default_value = "quiz-state.json")]
    state: PathBuf,

    /// Optional config file (TOML); defaults to `.roster-quiz.toml`.
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a sample state file with a small demo roster.
    Init,
    /// Run an interactive quiz session.
    Ask {
        /// User id to play as.
        #[arg(long, default_value_t = 1)]
        user: i64,
        /// How many questions to ask.
        #[arg(long, default_value_t = 5)]
        questions: usize,
    },
    /// Print the leaderboard.
    Leaderboard {
        /// Maximum number of rows.
        #[arg(long)]
        limit: Option<usize>,
    },
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

fn load_config(path: Option<PathBuf>) -> Result<QuizConfig, Box<dyn Error>> {
    let loader = match path {
        Some(path) => ConfigLoader::with_path(path),
        None => ConfigLoader::new(),
    };
    Ok(loader.load()?)
}

fn demo_roster(engine: &QuizEngine) -> Result<(), Box<dyn Error>> {
    let members = [
        (1, "Hanna", "Flute", "female"),
        (2, "Jakob", "Flute", "male"),
        (3, "Miriam", "Oboe", "female"),
        (4, "Lars", "Trumpet", "male"),
        (5, "Paula", "Tuba", "female"),
        (6, "Tim", "Clarinet", "male"),
        (7, "Sofia", "Horn", "female"),
    ];
    for (id, name, instrument, gender) in members {
        engine.add_member(
            Member::new(MemberId::new(id))
                .with_value("first_name", AttrValue::text(name))
                .with_value("instrument", AttrValue::text(instrument))
                .with_value("gender", AttrValue::text(gender)),
        )?;
    }
    Ok(())
}

fn member_name(engine: &QuizEngine, id: MemberId) -> String {
    engine
        .member(id)
        .ok()
        .and_then(|m| {
            m.value(&AttributeId::from("full_name"))
                .or_else(|| m.value(&AttributeId::from("first_name")))
                .map(|v| v.as_str().to_string())
        })
        .unwrap_or_else(|| format!("member {id}"))
}

async fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = load_config(cli.config.clone())?;
    let schema = Schema::akablas();

    match cli.command {
        Commands::Init => {
            let engine = QuizEngine::new(schema, config);
            demo_roster(&engine)?;
            engine.save_to_path(&cli.state).await?;
            println!("Wrote {} with {} members", cli.state.display(), engine.member_count());
        }
        Commands::Ask { user, questions } => {
            let engine = QuizEngine::load_from_path(schema, config, &cli.state).await?;
            let user = UserId::new(user);
            let stdin = std::io::stdin();
            let mut lines = stdin.lock().lines();

            for _ in 0..questions {
                let question = match engine.next_question(user) {
                    Ok(q) => q,
                    Err(e) => {
                        println!("{}", format!("Nothing to ask: {e}").yellow());
                        break;
                    }
                };
                let label = engine
                    .schema()
                    .label(question.attribute())
                    .unwrap_or("attribute")
                    .to_string();
                let name = member_name(&engine, question.member());
                println!("\nWhat is the {} of {}?", label.bold(), name.bold());

                if let Some(choices) = question.choices() {
                    for (i, choice) in choices.iter().enumerate() {
                        println!("  {}. {choice}", i + 1);
                    }
                }
                print!("> ");
                std::io::stdout().flush()?;

                let Some(line) = lines.next().transpose()? else {
                    engine.skip(user)?;
                    break;
                };
                let input = line.trim();
                if input.is_empty() {
                    engine.skip(user)?;
                    println!("{}", "Skipped.".yellow());
                    continue;
                }

                let answer = match question.choices() {
                    Some(choices) => match input.parse::<usize>() {
                        Ok(n) if (1..=choices.len()).contains(&n) => choices[n - 1].clone(),
                        _ => AttrValue::text(input),
                    },
                    None => AttrValue::text(input),
                };

                let result = engine.submit_answer(user, &answer)?;
                match result.outcome {
                    Outcome::Correct => println!("{}", "Correct!".green()),
                    Outcome::Incorrect => println!(
                        "{} The right answer was {}.",
                        "Wrong.".red(),
                        result.question.correct_answer().bold()
                    ),
                }
            }

            if let Some(score) = engine.score_snapshot(user) {
                println!(
                    "\nScore: {} / {} ({:.2} %), streak {}, best {}",
                    score.correct,
                    score.total_asked,
                    score.ratio(),
                    score.current_streak,
                    score.best_streak
                );
            }
            engine.save_to_path(&cli.state).await?;
        }
        Commands::Leaderboard { limit } => {
            let engine = QuizEngine::load_from_path(schema, config, &cli.state).await?;
            let rows: Vec<(String, roster_quiz::score::ScoreRecord)> = engine
                .leaderboard()
                .into_iter()
                .map(|(user, record)| (member_name(&engine, MemberId::new(user.get())), record))
                .collect();
            if rows.is_empty() {
                println!("No scores yet.");
            } else {
                println!("{}", roster_quiz::display::render_leaderboard(&rows, limit));
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("{}", format!("error: {e}").red());
        std::process::exit(1);
    }
}
