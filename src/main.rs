use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use artist_quiz::config::QuizConfig;
use artist_quiz::quiz::facts::ArtistFacts;
use artist_quiz::{generate_quiz, Quiz};
use clap::Parser;
use dotenv::dotenv;
use rand::RngCore;

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Music trivia about one artist
#[derive(Debug, Parser)]
#[command(name = "artist-quiz", about = "Generate a multiple-choice quiz about an artist")]
struct Args {
    /// Artist facts as JSON, shaped like the music catalog's responses
    facts: PathBuf,

    /// Answer the quiz on the terminal instead of printing it as JSON
    #[arg(long)]
    play: bool,
}

fn main() -> ExitCode {
    // A missing .env is fine, the environment may already be set up
    dotenv().ok();
    pretty_env_logger::init();

    let args = Args::parse();

    match run(args.facts, args.play) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Quiz unavailable: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(facts_path: PathBuf, play: bool) -> HandlerResult {
    let config = QuizConfig::from_env()?;
    log::debug!("Using {:?}", config);

    let templates = config.templates()?;
    let catalogs = config.catalogs()?;
    let mut rng = config.rng();

    // Fetch problems have to surface before any question is built
    let facts = ArtistFacts::from_file(&facts_path)?;
    log::info!("Generating a quiz about {}", facts.name);

    let quiz = generate_quiz(&facts, &templates, &catalogs, &mut rng)?;

    if play {
        play_quiz(&quiz, &mut rng)
    } else {
        println!("{}", serde_json::to_string_pretty(&quiz)?);
        Ok(())
    }
}

fn play_quiz(quiz: &Quiz, rng: &mut dyn RngCore) -> HandlerResult {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut selections = Vec::with_capacity(quiz.questions.len());

    println!("Let's see how well you know {}!", quiz.artist);

    for (number, question) in quiz.questions.iter().enumerate() {
        // Shuffle so the correct answer isn't always the first one
        let answers = question.shuffled_answers(rng);

        println!("\nQuestion #{}: {}", number + 1, question.text);
        for (i, answer) in answers.iter().enumerate() {
            if let Some(value) = &answer.value {
                println!("  {}) {}", i + 1, value);
            }
        }

        let choice = loop {
            print!("Your answer: ");
            io::stdout().flush()?;

            let Some(line) = lines.next() else {
                println!();
                return Ok(());
            };
            match line?.trim().parse::<usize>() {
                Ok(n) if (1..=answers.len()).contains(&n) => break n - 1,
                _ => println!("Please pick a number between 1 and {}", answers.len()),
            }
        };

        // Emitted questions have every slot filled
        let Some(selection) = answers[choice].value.clone() else {
            continue;
        };
        if question.is_correct(&selection) {
            println!("Correct!");
        } else if let Some(correct) = question.correct_answer() {
            println!("Wrong! The right answer is {}", correct);
        }
        selections.push(selection);
    }

    println!(
        "\nThe quiz is over! You answered {} of {} questions correctly",
        quiz.score(&selections),
        quiz.questions.len()
    );
    Ok(())
}
