use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde_json::{Map, Value, json};
use server::{MealPlanReply, RecommendationOrchestrator, ServerConfig, WorkoutReply};
use std::time::Instant;
use tokio_util::sync::CancellationToken;

/// FitRec - meal, workout and symptom recommendations
#[derive(Parser)]
#[command(name = "fitrec")]
#[command(about = "Meal plans, workout plans and symptom predictions from one orchestrator", long_about = None)]
struct Cli {
    /// Print replies as JSON instead of formatted text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve {
        /// Listen address (overrides HOST)
        #[arg(long)]
        host: Option<String>,

        /// Listen port (overrides PORT)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Generate a one-day meal plan
    Meal {
        /// "Weight Loss", "Maintain Weight" or "Muscle Gain"
        #[arg(long)]
        goal: String,

        /// Dietary preference, e.g. "Vegetarian"
        #[arg(long, default_value = "None")]
        preference: String,

        /// Comma-separated allergies to exclude
        #[arg(long, value_delimiter = ',')]
        allergies: Vec<String>,

        /// Body weight; scales the calorie target
        #[arg(long)]
        weight: Option<f64>,
    },

    /// Build a workout from one or more muscle groups
    Workout {
        #[arg(long)]
        goal: Option<String>,

        /// Beginner, Intermediate or Advanced
        #[arg(long)]
        fitness_level: Option<String>,

        /// body-only, dumbbell, barbell, kettlebell or machine
        #[arg(long)]
        equipment: String,

        /// Muscle group (repeatable, order is kept)
        #[arg(long = "muscle")]
        muscles: Vec<String>,

        #[arg(long)]
        session_time: Option<String>,
    },

    /// Run the symptom prediction program on a JSON payload
    Predict {
        /// Payload object, e.g. '{"primarySymptoms":"fever,cough"}'
        #[arg(long)]
        payload: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    server::init_tracing();

    let cli = Cli::parse();
    let mut config = ServerConfig::from_env().context("Invalid configuration")?;

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            server::serve(config).await?;
        }
        Commands::Meal {
            goal,
            preference,
            allergies,
            weight,
        } => {
            let body = meal_body(&goal, &preference, &allergies, weight);
            handle_meal(&config, &body, cli.json).await?
        }
        Commands::Workout {
            goal,
            fitness_level,
            equipment,
            muscles,
            session_time,
        } => {
            let body = workout_body(goal, fitness_level, &equipment, &muscles, session_time);
            handle_workout(&config, &body, cli.json).await?
        }
        Commands::Predict { payload } => {
            let body: Value =
                serde_json::from_str(&payload).context("--payload is not valid JSON")?;
            handle_predict(&config, &body).await?
        }
    }

    Ok(())
}

/// Handle the 'meal' command
async fn handle_meal(config: &ServerConfig, body: &Value, as_json: bool) -> Result<()> {
    let orchestrator = RecommendationOrchestrator::from_config(config)?;
    let start = Instant::now();
    let reply = orchestrator.meal_plan(body).await?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&reply)?);
    } else {
        print_meal_plan(&reply);
        println!("{} Generated in {:.2?}", "✓".green(), start.elapsed());
    }
    Ok(())
}

/// Handle the 'workout' command
async fn handle_workout(config: &ServerConfig, body: &Value, as_json: bool) -> Result<()> {
    let orchestrator = RecommendationOrchestrator::from_config(config)?;
    let start = Instant::now();
    let reply = orchestrator.workout_plan(body).await?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&reply)?);
    } else {
        print_workout(&reply);
        println!("{} Generated in {:.2?}", "✓".green(), start.elapsed());
    }
    Ok(())
}

/// Handle the 'predict' command. Prediction replies are always printed as JSON.
async fn handle_predict(config: &ServerConfig, body: &Value) -> Result<()> {
    let orchestrator = RecommendationOrchestrator::from_config(config)?;

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    let prediction = orchestrator.predict(body, cancel).await?;
    for (rank, p) in prediction.top_predictions.iter().enumerate() {
        println!(
            "{}. {} ({}%)",
            (rank + 1).to_string().green(),
            p.disease.bold(),
            p.probability
        );
    }
    println!("{}", serde_json::to_string_pretty(&prediction)?);
    Ok(())
}

fn meal_body(goal: &str, preference: &str, allergies: &[String], weight: Option<f64>) -> Value {
    let mut body = json!({
        "goal": goal,
        "preference": preference,
        "allergies": allergies,
    });
    if let Some(weight) = weight {
        body["weight"] = json!(weight);
    }
    body
}

fn workout_body(
    goal: Option<String>,
    fitness_level: Option<String>,
    equipment: &str,
    muscles: &[String],
    session_time: Option<String>,
) -> Value {
    let mut body = Map::new();
    body.insert("equipment".to_string(), json!(equipment));
    if !muscles.is_empty() {
        body.insert("muscleGroups".to_string(), json!(muscles));
    }
    for (key, value) in [
        ("goal", goal),
        ("fitnessLevel", fitness_level),
        ("sessionTime", session_time),
    ] {
        if let Some(value) = value {
            body.insert(key.to_string(), json!(value));
        }
    }
    Value::Object(body)
}

fn print_meal_plan(reply: &MealPlanReply) {
    print!("{}", "Meal Plan:\n".bold().blue());
    for (i, meal) in reply.plan.meals.iter().enumerate() {
        println!(
            "{}. {} - {} min, serves {}",
            (i + 1).to_string().green(),
            meal.title,
            meal.ready_in_minutes,
            meal.servings
        );
        println!("   {}", meal.source_url.dimmed());
    }

    let n = &reply.plan.nutrients;
    println!(
        "{}Calories: {:.0}  Protein: {:.1}g  Carbs: {:.1}g  Fat: {:.1}g",
        "• ".cyan(),
        n.calories,
        n.protein,
        n.carbohydrates,
        n.fat
    );
}

fn print_workout(reply: &WorkoutReply) {
    print!("{}", "Workout Plan:\n".bold().blue());
    for (label, value) in [
        ("Goal", &reply.goal),
        ("Fitness level", &reply.fitness_level),
        ("Session time", &reply.session_time),
    ] {
        if let Some(value) = value {
            let text = value.as_str().map(str::to_string).unwrap_or_else(|| value.to_string());
            println!("{}{}: {}", "• ".green(), label, text);
        }
    }

    for (i, exercise) in reply.exercises.iter().enumerate() {
        println!(
            "{}. {} [{}] {} / {}",
            (i + 1).to_string().green(),
            exercise.name.bold(),
            exercise.muscle,
            exercise.equipment,
            exercise.difficulty
        );
        println!("   {}", exercise.instructions);
    }
}
