//! Terminal front end for a roguelike run.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use pokemon_roguelike::battle::state::OPPONENT_SIDE;
use pokemon_roguelike::pokemon::display_name;
use pokemon_roguelike::{
    BattleOutcome, BattlePhase, BattleSession, EventBus, LocalDex, PokemonType, RunConfig,
    TurnRng,
};
use strum::IntoEnumIterator;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

#[derive(Parser)]
#[command(name = "pokemon-roguelike")]
#[command(about = "Endless wild battles with a growing roster", long_about = None)]
#[command(version)]
struct Cli {
    /// Type of the starter, e.g. "fire". Asked for interactively when omitted.
    #[arg(long)]
    starter_type: Option<PokemonType>,

    /// Seed for a reproducible run.
    #[arg(long)]
    seed: Option<u64>,

    /// RON file overriding the run constants.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding species.ron and moves.ron instead of the bundled data.
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Print a JSON snapshot after every command instead of the text view.
    #[arg(long)]
    json: bool,
}

type InputLines = Lines<BufReader<Stdin>>;

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::from_env()?,
    };
    let dex = match &cli.data_dir {
        Some(dir) => LocalDex::from_dir(dir)
            .with_context(|| format!("loading reference data from {}", dir.display()))?,
        None => LocalDex::bundled().context("loading bundled reference data")?,
    };
    let rng = match cli.seed {
        Some(seed) => TurnRng::from_seed(seed),
        None => TurnRng::new_random(),
    };

    let mut input = BufReader::new(tokio::io::stdin()).lines();
    let starter_type = match cli.starter_type {
        Some(starter_type) => starter_type,
        None => match prompt_starter_type(&mut input).await? {
            Some(starter_type) => starter_type,
            None => return Ok(()),
        },
    };

    let mut session = BattleSession::start(config, Arc::new(dex), starter_type, rng).await;
    for line in session.messages().iter() {
        println!("{}", line);
    }
    render(&session, cli.json)?;

    while let Some(line) = input.next_line().await? {
        let command = line.trim();
        if command == "q" || command == "quit" {
            break;
        }
        match apply_command(&mut session, command).await {
            Some(bus) => print_events(&session, &bus),
            None => println!("That isn't possible right now."),
        }
        render(&session, cli.json)?;
    }

    Ok(())
}

fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn prompt_starter_type(input: &mut InputLines) -> Result<Option<PokemonType>> {
    let names: Vec<String> = PokemonType::iter().map(|t| t.to_string()).collect();
    println!("Choose a starter type: {}", names.join(", "));
    while let Some(line) = input.next_line().await? {
        match line.trim().parse::<PokemonType>() {
            Ok(starter_type) => return Ok(Some(starter_type)),
            Err(_) => println!("Unknown type. Try one of: {}", names.join(", ")),
        }
    }
    Ok(None)
}

/// Numbers are 1-based on the terminal.
fn parse_index(text: &str) -> Option<usize> {
    text.parse::<usize>().ok()?.checked_sub(1)
}

async fn apply_command(session: &mut BattleSession, command: &str) -> Option<EventBus> {
    match session.phase() {
        BattlePhase::SelectMove => match command.strip_prefix('s') {
            Some(rest) => session.switch_to(parse_index(rest)?),
            None => session.select_move(parse_index(command)?),
        },
        BattlePhase::PokemonSelection | BattlePhase::ReplacementSelection => {
            session.select_replacement(parse_index(command)?)
        }
        BattlePhase::BattleEnd(BattleOutcome::Victory) => match command {
            "c" => session.confirm_catch(true),
            "n" if session.catch_available() => session.confirm_catch(false),
            "n" | "" => session.advance_to_next_battle().await,
            _ => None,
        },
        BattlePhase::BattleEnd(BattleOutcome::Defeat) => match command {
            "r" => Some(session.restart_run().await),
            _ => None,
        },
        BattlePhase::Executing => None,
    }
}

fn print_events(session: &BattleSession, bus: &EventBus) {
    for line in bus.messages(session.state()) {
        println!("{}", line);
    }
}

fn render(session: &BattleSession, json: bool) -> Result<()> {
    if json {
        println!("{}", session.snapshot().to_json()?);
        return Ok(());
    }

    let snapshot = session.snapshot();
    println!();
    println!("-- Battle {} --", snapshot.battle_number);
    if let Some(opponent) = &snapshot.opponent_active {
        println!(
            "Wild {} Lv{}  HP {}/{}",
            opponent.display_name, opponent.level, opponent.hp, opponent.max_hp
        );
    }
    if let Some(active) = &snapshot.player_active {
        println!(
            "Your {} Lv{}  HP {}/{}",
            active.display_name, active.level, active.hp, active.max_hp
        );
    }

    match snapshot.phase {
        BattlePhase::SelectMove => {
            if let Some(forced) = &snapshot.forced_move {
                println!("{} must be released. Enter any move number.", display_name(forced));
            }
            if let Some(active) = &snapshot.player_active {
                for (index, move_view) in active.moves.iter().enumerate() {
                    let marker = if move_view.disabled { " (empty)" } else { "" };
                    println!(
                        "  {}) {} [{}] {}/{}{}",
                        index + 1,
                        move_view.display_name,
                        move_view.move_type,
                        move_view.pp,
                        move_view.max_pp,
                        marker
                    );
                }
            }
            if snapshot.roster.len() > 1 {
                println!("  s<N>) switch to roster member N");
            }
        }
        BattlePhase::PokemonSelection => {
            println!("Choose who to send out:");
            print_roster(&snapshot.roster);
        }
        BattlePhase::ReplacementSelection => {
            let caught = session
                .state()
                .players[OPPONENT_SIDE]
                .active_pokemon()
                .map(|pokemon| pokemon.display_name())
                .unwrap_or_default();
            println!("Your roster is full. Choose who to release for {}:", caught);
            print_roster(&snapshot.roster);
        }
        BattlePhase::BattleEnd(BattleOutcome::Victory) => {
            if snapshot.catch_available {
                println!("  c) catch it   n) let it go");
            } else {
                println!("  n) next battle");
            }
        }
        BattlePhase::BattleEnd(BattleOutcome::Defeat) => {
            println!("  r) start a new run   q) quit");
        }
        BattlePhase::Executing => {}
    }
    Ok(())
}

fn print_roster(roster: &[pokemon_roguelike::session::RosterEntry]) {
    for (index, entry) in roster.iter().enumerate() {
        let state = if entry.fainted { " (fainted)" } else { "" };
        println!(
            "  {}) {} HP {}/{}{}",
            index + 1,
            entry.display_name,
            entry.hp,
            entry.max_hp,
            state
        );
    }
}
