//! HealthAI - Main CLI Entry Point

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use healthai::assistant::{Assistant, AssistantConfig, PatientProfile};
use healthai::repl::{DisplayManager, ReadOutcome, ReplConfig, ReplSession};
use healthai::responses::MEDICAL_DISCLAIMER;
use healthai::telemetry::init_tracing;
use healthai::{
    cli::{Args, Commands, Config, Verbosity},
    HealthError,
};
use tracing::debug;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if let Err(msg) = args.validate() {
        eprintln!("{} {}", "Error:".red().bold(), msg);
        std::process::exit(2);
    }

    let config = match Config::load(args.config.as_deref()) {
        Ok(config) => config.with_overrides(args.no_delay, args.seed),
        Err(err) => fail(&err),
    };
    let verbosity = args.verbosity_or(config.verbosity());
    init_tracing(verbosity);

    if !config.display.color_output {
        colored::control::set_override(false);
    }
    debug!(?verbosity, "Configuration loaded");

    let outcome = match &args.command {
        Some(Commands::Start) => run_repl(&config, verbosity).await,
        Some(Commands::Bmi {
            height,
            weight,
            json,
        }) => run_bmi(&config, height, weight, *json),
        Some(Commands::Predict { symptoms }) => run_predict(&config, verbosity, symptoms).await,
        Some(Commands::Treatment {
            condition,
            age,
            gender,
            history,
        }) => run_treatment(&config, verbosity, condition, age, gender, history).await,
        Some(Commands::Config) => {
            show_config(&config, verbosity);
            Ok(())
        }
        Some(Commands::Disclaimer) => {
            println!("{}", MEDICAL_DISCLAIMER);
            Ok(())
        }
        None => {
            if let Some(question) = &args.question {
                run_question(&config, verbosity, question).await
            } else {
                show_usage();
                Ok(())
            }
        }
    };

    if let Err(err) = outcome {
        fail(&err);
    }

    Ok(())
}

fn fail(err: &HealthError) -> ! {
    eprintln!("{} {}", "Error:".red().bold(), err);
    std::process::exit(exit_code(err));
}

/// 1 for input the user can correct, 2 for everything else
fn exit_code(err: &HealthError) -> i32 {
    if err.is_user_error() {
        1
    } else {
        2
    }
}

fn assistant_for(config: &Config) -> Assistant {
    Assistant::new(AssistantConfig {
        latency: config.latency_profile(),
        seed: config.assistant.seed,
    })
}

fn display_for(config: &Config, verbosity: Verbosity) -> DisplayManager {
    DisplayManager::new().with_spinner(config.display.show_spinner && verbosity.show_progress())
}

/// Run interactive REPL mode
async fn run_repl(config: &Config, verbosity: Verbosity) -> healthai::Result<()> {
    let repl_config = ReplConfig {
        history_file: Some(config.history_file()),
        show_spinner: config.display.show_spinner && verbosity.show_progress(),
        max_history: config.session.max_history,
    };

    let mut repl_session = ReplSession::new(assistant_for(config), repl_config)?;
    repl_session.set_verbose(verbosity.show_events());
    repl_session.show_welcome(env!("CARGO_PKG_VERSION"));

    loop {
        match repl_session.read_input()? {
            ReadOutcome::Line(input) => {
                if input.is_empty() {
                    continue;
                }

                match repl_session.handle_input(&input).await {
                    Ok(true) => {}
                    Ok(false) => break,
                    Err(e) => repl_session.display().show_error(&e.to_string()),
                }
            }
            ReadOutcome::Interrupted => {
                println!("\nUse /exit to quit gracefully");
            }
            ReadOutcome::Eof => break,
        }
    }

    repl_session.save()?;
    Ok(())
}

/// One-shot chat question
async fn run_question(config: &Config, verbosity: Verbosity, question: &str) -> healthai::Result<()> {
    let mut display = display_for(config, verbosity);
    let mut assistant = assistant_for(config);

    display.start_waiting("HealthAI is thinking...");
    let reply = assistant.chat(question).await;
    display.finish_current();

    display.show_chat_reply(&reply?);
    Ok(())
}

fn run_bmi(config: &Config, height: &str, weight: &str, json: bool) -> healthai::Result<()> {
    let assistant = assistant_for(config);
    let result = assistant.bmi_from_text(height, weight)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        DisplayManager::new().show_bmi(&result);
    }
    Ok(())
}

async fn run_predict(config: &Config, verbosity: Verbosity, symptoms: &str) -> healthai::Result<()> {
    let mut display = display_for(config, verbosity);
    let mut assistant = assistant_for(config);

    display.start_waiting("Analyzing symptoms...");
    let analysis = assistant.analyze_symptoms(symptoms).await;
    display.finish_current();

    display.show_analysis(&analysis?);
    Ok(())
}

async fn run_treatment(
    config: &Config,
    verbosity: Verbosity,
    condition: &str,
    age: &str,
    gender: &str,
    history: &str,
) -> healthai::Result<()> {
    let profile = PatientProfile::parse(condition, age, gender, history)?;
    let mut display = display_for(config, verbosity);
    let mut assistant = assistant_for(config);

    display.start_waiting("Generating treatment plan...");
    let plan = assistant.treatment_plan(&profile).await;
    display.finish_current();

    display.show_plan(&plan?);
    Ok(())
}

fn show_config(config: &Config, verbosity: Verbosity) {
    println!("\n{}", "HealthAI Configuration".bold().cyan());
    println!("{}", "=".repeat(60).cyan());

    println!("Assistant:");
    println!(
        "  Simulated latency: {}",
        if config.assistant.simulate_latency { "enabled" } else { "disabled" }
    );
    println!("  Latency scale:     {}", config.assistant.latency_scale);
    match config.assistant.seed {
        Some(seed) => println!("  Seed:              {}", seed),
        None => println!("  Seed:              random"),
    }
    println!();

    println!("Session:");
    println!("  Max chat history:  {}", config.session.max_history);
    println!();

    println!("Display:");
    println!("  Verbosity:         {}", verbosity.as_str());
    println!("  Spinner:           {}", config.display.show_spinner);
    println!("  Colors:            {}", config.display.color_output);
    println!();

    println!("Paths:");
    println!("  State dir:         {}", config.state_dir().display());
    println!("  History file:      {}", config.history_file().display());
    println!();
}

fn show_usage() {
    println!("HealthAI {} - Intelligent Healthcare Assistant (demo)", env!("CARGO_PKG_VERSION"));
    println!("\nUsage:");
    println!("  healthai <question>                          Ask a health question");
    println!("  healthai start                               Interactive mode");
    println!("  healthai bmi --height 170 --weight 70        Calculate BMI");
    println!("  healthai predict \"fever, headache\"           Analyze symptoms");
    println!("  healthai treatment --condition asthma --age 30 --gender female");
    println!("  healthai config                              Show configuration");
    println!("  healthai disclaimer                          Show medical disclaimer");
    println!("\nExample:");
    println!("  healthai \"What are the benefits of regular exercise?\"");
    println!();
}
