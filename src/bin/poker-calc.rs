use clap::{Parser, Subcommand};
use poker_calc::cards::format_cards;
use poker_calc::charts::ChartBook;
use poker_calc::{Engine, EngineConfig};
use serde::Serialize;
use std::error::Error;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Hold'em hand evaluation, equity and call/fold analysis", long_about = None)]
struct Cli {
    /// Seed for reproducible simulations
    #[arg(long, global = true)]
    seed: Option<u64>,
    /// Monte Carlo iterations
    #[arg(long, global = true, default_value_t = EngineConfig::DEFAULT_ITERATIONS)]
    iterations: u32,
    /// Run simulation chunks on all cores
    #[arg(long, global = true)]
    parallel: bool,
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    #[command(about = "Evaluate hero's best hand on a board", alias = "ev")]
    Eval { hero: String, board: String },
    #[command(about = "Simulate equity against a hand or a range", alias = "eq")]
    Equity {
        hero: String,
        /// Two cards ("Ks Kd") or range notation ("QQ+, AKs")
        villain: String,
        #[arg(long, default_value = "")]
        board: String,
    },
    #[command(about = "Count outs on a flop or turn")]
    Outs { hero: String, board: String },
    #[command(about = "Expand range notation")]
    Range { notation: String },
    #[command(about = "Recommend a call or fold")]
    Analyze {
        hero: String,
        board: String,
        #[arg(long)]
        pot: Option<f64>,
        #[arg(long)]
        bet: Option<f64>,
        #[arg(long)]
        stack: Option<f64>,
        #[arg(long)]
        villain_range: Option<String>,
    },
    #[command(about = "Look up a preflop chart from a JSON file")]
    Chart {
        file: String,
        position: Option<String>,
        action: Option<String>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let mut config = EngineConfig::default().with_iterations(cli.iterations).with_parallel(cli.parallel);
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    let engine = Engine::new(config);

    match &cli.command {
        Command::Eval { hero, board } => {
            let eval = engine.evaluate_hand(hero, board)?;
            emit(cli.json, &eval, || eval.description.clone())
        }
        Command::Equity { hero, villain, board } => {
            let r = engine.calculate_equity(hero, villain, board, cli.iterations)?;
            emit(cli.json, &r, || {
                format!(
                    "hero {:.2}%  villain {:.2}%  ties {:.2}%  ({} iterations)",
                    r.hero_equity, r.villain_equity, r.tie_rate, r.iterations
                )
            })
        }
        Command::Outs { hero, board } => {
            let outs = engine.compute_outs(hero, board)?;
            emit(cli.json, &outs, || {
                let mut lines = vec![format!("{} outs ({:.0} equivalent, {} unseen)", outs.count(), outs.equivalent_outs(), outs.unseen)];
                for (draw, group) in &outs.by_category {
                    lines.push(format!("  {draw}: {} [{}] {}", group.count(), format_cards(&group.cards), group.detail));
                }
                if let Some(suit) = outs.backdoor_flush {
                    lines.push(format!("  Backdoor Flush Draw: {}", suit.name()));
                }
                lines.join("\n")
            })
        }
        Command::Range { notation } => {
            let summary = engine.parse_range(notation)?;
            emit(cli.json, &summary, || {
                format!(
                    "{}\n{} combos ({} pairs, {} suited, {} offsuit), {:.1}% of hands",
                    summary.hands.join(" "),
                    summary.total_combos,
                    summary.combo_counts.pairs,
                    summary.combo_counts.suited,
                    summary.combo_counts.offsuit,
                    summary.percentage
                )
            })
        }
        Command::Analyze { hero, board, pot, bet, stack, villain_range } => {
            let rec = engine.analyze_spot(hero, board, *pot, *bet, *stack, villain_range.as_deref())?;
            emit(cli.json, &rec, || {
                let mut lines = vec![
                    format!("{} ({:?} confidence)", rec.action, rec.confidence),
                    format!("hand: {}", rec.description),
                    format!("equity: {:.1}% via {}", rec.equity, rec.equity_method),
                ];
                if let Some(odds) = &rec.pot_odds {
                    lines.push(format!("pot odds: {:.2}% ({})", odds.percentage, odds.ratio));
                }
                if let Some(spr) = rec.spr {
                    lines.push(format!("spr: {:.2} ({})", spr.ratio, spr.category));
                }
                lines.extend(rec.reasoning.iter().map(|r| format!("- {r}")));
                lines.join("\n")
            })
        }
        Command::Chart { file, position, action } => {
            let book = ChartBook::from_path(file)?;
            match (position, action) {
                (Some(pos), Some(act)) => {
                    let chart = book.get(pos, act).ok_or_else(|| format!("no chart for {pos} / {act}"))?;
                    emit(cli.json, chart, || {
                        book.matrix(pos, act)
                            .map(|grid| {
                                grid.iter()
                                    .map(|row| row.iter().map(|&x| if x { 'X' } else { '.' }).collect::<String>())
                                    .collect::<Vec<_>>()
                                    .join("\n")
                            })
                            .unwrap_or_default()
                    })
                }
                (Some(pos), None) => {
                    let actions = book.actions(pos);
                    emit(cli.json, &actions, || actions.join("\n"))
                }
                _ => {
                    let positions = book.positions();
                    emit(cli.json, &positions, || positions.join("\n"))
                }
            }
        }
    }
}

fn emit<T: Serialize + ?Sized>(json: bool, value: &T, text: impl FnOnce() -> String) -> Result<(), Box<dyn Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", text());
    }
    Ok(())
}
